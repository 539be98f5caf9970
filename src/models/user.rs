use diesel::prelude::*;

use crate::domain::types::{FullName, TypeConstraintError, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub full_name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub full_name: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            full_name: FullName::new(user.full_name)?,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            full_name: user.full_name.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_user_into_domain() {
        let user = DomainUser::try_from(User {
            id: 3,
            full_name: "Ann".to_string(),
        })
        .unwrap();
        assert_eq!(user.id.get(), 3);
        assert_eq!(user.full_name.as_str(), "Ann");
    }

    #[test]
    fn invalid_row_is_rejected() {
        let result = DomainUser::try_from(User {
            id: 0,
            full_name: "Ann".to_string(),
        });
        assert_eq!(result, Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn domain_new_user_into_insertable() {
        let domain = DomainNewUser::new(FullName::new("Bob").unwrap());
        let insertable: NewUser = (&domain).into();
        assert_eq!(insertable.full_name, "Bob");
    }
}
