/// Fields a step form may carry.
///
/// Parsed from raw `application/x-www-form-urlencoded` pairs so repeated
/// keys (`tables`, `selected_columns`) keep their submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepForm {
    pub username: String,
    pub password: Option<String>,
    pub primavera_url: String,
    pub session: Option<String>,
    pub tables: Vec<String>,
    pub selected_columns: Vec<String>,
}

impl StepForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = StepForm::default();

        for (key, value) in pairs {
            match key.as_str() {
                "username" => form.username = value,
                "password" => form.password = Some(value),
                "primavera_url" => form.primavera_url = value,
                "session" if !value.is_empty() => form.session = Some(value),
                "tables" | "tables[]" => form.tables.push(value),
                "selected_columns" | "selected_columns[]" => form.selected_columns.push(value),
                _ => {}
            }
        }

        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_keys_keep_order() {
        let form = StepForm::from_pairs(pairs(&[
            ("username", "admin"),
            ("tables", "PROJECT"),
            ("tables[]", "ACTIVITY"),
            ("selected_columns", "PROJECT:Id"),
            ("tables", "WBS"),
        ]));

        assert_eq!(form.username, "admin");
        assert_eq!(form.tables, vec!["PROJECT", "ACTIVITY", "WBS"]);
        assert_eq!(form.selected_columns, vec!["PROJECT:Id"]);
        assert_eq!(form.password, None);
    }

    #[test]
    fn test_blank_session_is_absent() {
        let form = StepForm::from_pairs(pairs(&[("session", ""), ("password", "")]));
        assert_eq!(form.session, None);
        assert_eq!(form.password, Some(String::new()));
    }
}
