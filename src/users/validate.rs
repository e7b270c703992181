use serde_json::Value;

use crate::users::dto::UserPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// Check a candidate payload field by field, in a fixed order, and build
/// the typed payload with defaults applied. Returns the first failing
/// field's message. Never touches the store.
///
/// Update payloads go through the same rules as create: a full replace
/// still requires every required field, password included.
pub fn validate_user(body: &Value, _mode: ValidationMode) -> Result<UserPayload, String> {
    let fname = required_text(body, "fname")?;
    let lname = optional_text(body, "lname")?.unwrap_or_default();
    let username = required_text(body, "username")?;
    let password = required_text(body, "password")?;
    let age = optional_number(body, "age")?.unwrap_or(0.0) as i32;
    let url = optional_text(body, "url")?.unwrap_or_default();
    let gender = required_text(body, "gender")?;
    let is_active = optional_bool(body, "isActive")?;
    let budget = optional_number(body, "budget")?.unwrap_or(0.0);

    Ok(UserPayload {
        fname,
        lname,
        username,
        password,
        age,
        url,
        gender,
        is_active,
        budget,
    })
}

fn required_text(body: &Value, field: &str) -> Result<String, String> {
    match body.get(field) {
        None => Err(format!("\"{field}\" is required")),
        Some(v) => v
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| format!("\"{field}\" must be a string")),
    }
}

fn optional_text(body: &Value, field: &str) -> Result<Option<String>, String> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or_else(|| format!("\"{field}\" must be a string")),
    }
}

fn optional_number(body: &Value, field: &str) -> Result<Option<f64>, String> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("\"{field}\" must be a number")),
    }
}

fn optional_bool(body: &Value, field: &str) -> Result<Option<bool>, String> {
    match body.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| format!("\"{field}\" must be a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "fname": "Ada",
            "lname": "Lovelace",
            "username": "ada",
            "password": "difference-engine",
            "age": 36,
            "url": "https://example.com/ada",
            "gender": "female",
            "isActive": false,
            "budget": 1842.5
        })
    }

    #[test]
    fn accepts_full_payload() {
        let p = validate_user(&full_payload(), ValidationMode::Create).unwrap();
        assert_eq!(p.fname, "Ada");
        assert_eq!(p.age, 36);
        assert_eq!(p.is_active, Some(false));
        assert_eq!(p.budget, 1842.5);
    }

    #[test]
    fn missing_fname_fails_first() {
        let err = validate_user(&json!({}), ValidationMode::Create).unwrap_err();
        assert_eq!(err, "\"fname\" is required");
    }

    #[test]
    fn field_order_is_fixed() {
        // username is reported before password and gender.
        let err = validate_user(
            &json!({"fname": "Ada", "password": "x", "gender": "female"}),
            ValidationMode::Create,
        )
        .unwrap_err();
        assert_eq!(err, "\"username\" is required");
    }

    #[test]
    fn wrong_types_are_rejected_with_field_name() {
        let mut body = full_payload();
        body["age"] = json!("thirty-six");
        let err = validate_user(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(err, "\"age\" must be a number");

        let mut body = full_payload();
        body["isActive"] = json!("yes");
        let err = validate_user(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(err, "\"isActive\" must be a boolean");

        let mut body = full_payload();
        body["fname"] = json!(7);
        let err = validate_user(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(err, "\"fname\" must be a string");
    }

    #[test]
    fn optional_fields_default() {
        let body = json!({
            "fname": "Ada",
            "username": "ada",
            "password": "x",
            "gender": "female"
        });
        let p = validate_user(&body, ValidationMode::Create).unwrap();
        assert_eq!(p.lname, "");
        assert_eq!(p.age, 0);
        assert_eq!(p.url, "");
        assert_eq!(p.is_active, None);
        assert_eq!(p.budget, 0.0);
    }

    #[test]
    fn empty_lname_and_url_are_allowed() {
        let mut body = full_payload();
        body["lname"] = json!("");
        body["url"] = json!("");
        let p = validate_user(&body, ValidationMode::Create).unwrap();
        assert_eq!(p.lname, "");
        assert_eq!(p.url, "");
    }

    #[test]
    fn update_mode_still_requires_password() {
        // Full-replace semantics: a partial update without a password is
        // rejected, same as create.
        let mut body = full_payload();
        body.as_object_mut().unwrap().remove("password");
        let err = validate_user(&body, ValidationMode::Update).unwrap_err();
        assert_eq!(err, "\"password\" is required");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut body = full_payload();
        body["role"] = json!("admin");
        assert!(validate_user(&body, ValidationMode::Create).is_ok());
    }

    #[test]
    fn null_is_a_type_error_not_an_absence() {
        let mut body = full_payload();
        body["lname"] = json!(null);
        let err = validate_user(&body, ValidationMode::Create).unwrap_err();
        assert_eq!(err, "\"lname\" must be a string");
    }
}
