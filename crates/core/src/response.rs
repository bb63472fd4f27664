//! API response shape validation.

use serde_json::Value;
use tracing::error;

use crate::Error;

/// Validate the poll response shape and return the homework list.
///
/// The list may be empty; an empty list is a valid "nothing changed"
/// answer, not an error.
pub fn check_response(response: &Value) -> Result<&Vec<Value>, Error> {
    let Some(fields) = response.as_object() else {
        error!("API response is not an object");
        return Err(Error::TypeMismatch("response"));
    };
    let Some(homeworks) = fields.get("homeworks") else {
        error!("API response has no \"homeworks\" key");
        return Err(Error::MissingKey("homeworks"));
    };
    homeworks.as_array().ok_or_else(|| {
        error!("\"homeworks\" is not a list");
        Error::TypeMismatch("homeworks")
    })
}

/// Extract the server-side watermark used as `from_date` on the next poll.
pub fn current_date(response: &Value) -> Result<i64, Error> {
    let Some(value) = response.get("current_date") else {
        error!("API response has no \"current_date\" key");
        return Err(Error::MissingKey("current_date"));
    };
    value.as_i64().ok_or_else(|| {
        error!("\"current_date\" is not an integer");
        Error::TypeMismatch("current_date")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_response_ok() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        });
        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 1);
    }

    #[test]
    fn test_check_response_empty_list_ok() {
        let response = json!({"homeworks": [], "current_date": 1000});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_check_response_not_an_object() {
        let response = json!([{"homework_name": "hw1"}]);
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch("response")));
    }

    #[test]
    fn test_check_response_missing_homeworks() {
        let response = json!({"current_date": 1000});
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, Error::MissingKey("homeworks")));
    }

    #[test]
    fn test_check_response_homeworks_not_a_list() {
        let response = json!({
            "homeworks": {"homework_name": "hw1", "status": "approved"},
            "current_date": 1000
        });
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch("homeworks")));
    }

    #[test]
    fn test_current_date_ok() {
        let response = json!({"homeworks": [], "current_date": 1_700_000_000});
        assert_eq!(current_date(&response).unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_current_date_missing() {
        let response = json!({"homeworks": []});
        let err = current_date(&response).unwrap_err();
        assert!(matches!(err, Error::MissingKey("current_date")));
    }

    #[test]
    fn test_current_date_wrong_type() {
        let response = json!({"homeworks": [], "current_date": "soon"});
        let err = current_date(&response).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch("current_date")));
    }
}
