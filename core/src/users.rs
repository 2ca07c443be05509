//! Statement builders and row parsers for the `users` table.

use crate::error::QueryError;
use crate::sql::{decode_first, decode_rows, Row, Statement};
use crate::types::{CreateUser, User};

pub const SELECT_ALL: &str = "SELECT * FROM users";
pub const INSERT: &str =
    "INSERT INTO users (name, email, created_at) VALUES ($1, $2, NOW()) RETURNING *";

pub const NAME_AND_EMAIL_REQUIRED: &str = "Name and email are required";

pub fn build_list_users() -> Statement {
    Statement::new(SELECT_ALL)
}

/// Both `name` and `email` must be present and non-empty. The store assigns
/// `id` and `created_at`, and the inserted row is returned.
pub fn build_create_user(input: &CreateUser) -> Result<Statement, QueryError> {
    let supplied = |field: &Option<String>| field.clone().filter(|v| !v.is_empty());
    match (supplied(&input.name), supplied(&input.email)) {
        (Some(name), Some(email)) => Ok(Statement::new(INSERT).bind(name).bind(email)),
        _ => Err(QueryError::Validation(NAME_AND_EMAIL_REQUIRED)),
    }
}

pub fn parse_list_users(rows: Vec<Row>) -> Result<Vec<User>, QueryError> {
    Ok(decode_rows(rows)?)
}

pub fn parse_created_user(rows: Vec<Row>) -> Result<User, QueryError> {
    decode_first(rows)?.ok_or(QueryError::NoRows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;
    use serde_json::json;

    fn input(name: Option<&str>, email: Option<&str>) -> CreateUser {
        CreateUser {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn create_binds_name_then_email() {
        let stmt = build_create_user(&input(Some("Ada"), Some("ada@example.com"))).unwrap();
        assert_eq!(stmt.sql, INSERT);
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::Text("Ada".to_string()),
                SqlValue::Text("ada@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn create_rejects_missing_email() {
        let err = build_create_user(&input(Some("Ada"), None)).unwrap_err();
        assert_eq!(err.to_string(), "Name and email are required");
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = build_create_user(&input(Some(""), Some("ada@example.com"))).unwrap_err();
        assert!(matches!(err, QueryError::Validation(NAME_AND_EMAIL_REQUIRED)));
    }

    #[test]
    fn list_selects_everything() {
        let stmt = build_list_users();
        assert_eq!(stmt.sql, "SELECT * FROM users");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn parse_created_user_reads_timestamp() {
        let rows = vec![json!({
            "id": 4,
            "name": "Ada",
            "email": "ada@example.com",
            "created_at": "2024-05-01T12:30:00Z"
        })
        .as_object()
        .cloned()
        .unwrap()];
        let user = parse_created_user(rows).unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn parse_created_user_empty_is_no_rows() {
        assert!(matches!(
            parse_created_user(Vec::new()),
            Err(QueryError::NoRows)
        ));
    }
}
