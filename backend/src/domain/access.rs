//! Authorization gate shared by both apps.
//!
//! Every route declares a [`Requirement`]. [`authorize`] turns the caller and
//! the requirement into one of three outcomes. Ownership mismatches are
//! reported as [`Access::NotFound`] so a foreign record looks exactly like a
//! missing one.

use super::error::Error;
use super::user::UserId;

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// No session.
    Anonymous,
    /// Logged-in user.
    User(UserId),
}

impl Actor {
    /// Identifier of the logged-in user, if any.
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }
}

impl From<Option<UserId>> for Actor {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::User)
    }
}

/// What a route demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone may proceed.
    Public,
    /// Any logged-in user may proceed.
    Authenticated,
    /// Only the owning user may proceed.
    Owner(UserId),
}

/// Gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Send the caller to the login page, remembering where they were going.
    LoginRequired,
    /// Pretend the resource does not exist.
    NotFound,
    /// Proceed.
    Granted,
}

/// Decide whether `actor` may proceed past `requirement`.
///
/// # Examples
/// ```
/// use bulletin::domain::{Access, Actor, Requirement, UserId, authorize};
///
/// let owner = UserId::new(1);
/// assert_eq!(authorize(Actor::Anonymous, Requirement::Owner(owner)), Access::LoginRequired);
/// assert_eq!(authorize(Actor::User(UserId::new(2)), Requirement::Owner(owner)), Access::NotFound);
/// assert_eq!(authorize(Actor::User(owner), Requirement::Owner(owner)), Access::Granted);
/// ```
pub fn authorize(actor: Actor, requirement: Requirement) -> Access {
    match (actor, requirement) {
        (_, Requirement::Public) => Access::Granted,
        (Actor::Anonymous, _) => Access::LoginRequired,
        (Actor::User(_), Requirement::Authenticated) => Access::Granted,
        (Actor::User(id), Requirement::Owner(owner)) if id == owner => Access::Granted,
        (Actor::User(_), Requirement::Owner(_)) => Access::NotFound,
    }
}

/// Fail with `not_found` unless `user` owns the resource.
///
/// Callers have already passed the login gate, so only the ownership branch
/// of [`authorize`] can fire here.
pub fn ensure_owner(user: UserId, owner: UserId, what: &str) -> Result<(), Error> {
    match authorize(Actor::User(user), Requirement::Owner(owner)) {
        Access::Granted => Ok(()),
        Access::LoginRequired | Access::NotFound => Err(Error::not_found(format!("{what} not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const AUTHOR: UserId = UserId::new(1);
    const READER: UserId = UserId::new(2);

    #[rstest]
    #[case(Actor::Anonymous, Requirement::Public, Access::Granted)]
    #[case(Actor::Anonymous, Requirement::Authenticated, Access::LoginRequired)]
    #[case(Actor::Anonymous, Requirement::Owner(AUTHOR), Access::LoginRequired)]
    #[case(Actor::User(READER), Requirement::Public, Access::Granted)]
    #[case(Actor::User(READER), Requirement::Authenticated, Access::Granted)]
    #[case(Actor::User(READER), Requirement::Owner(AUTHOR), Access::NotFound)]
    #[case(Actor::User(AUTHOR), Requirement::Owner(AUTHOR), Access::Granted)]
    fn gate_outcomes(#[case] actor: Actor, #[case] requirement: Requirement, #[case] expected: Access) {
        assert_eq!(authorize(actor, requirement), expected);
    }

    #[rstest]
    fn foreign_resources_are_not_found() {
        let err = ensure_owner(READER, AUTHOR, "note").expect_err("foreign note");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "note not found");
    }

    #[rstest]
    fn owners_pass() {
        assert!(ensure_owner(AUTHOR, AUTHOR, "comment").is_ok());
    }

    #[rstest]
    #[case(None, Actor::Anonymous)]
    #[case(Some(AUTHOR), Actor::User(AUTHOR))]
    fn actor_from_session(#[case] session: Option<UserId>, #[case] expected: Actor) {
        assert_eq!(Actor::from(session), expected);
        assert_eq!(expected.user_id(), session);
    }
}
