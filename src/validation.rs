//! Field-level validation applied before a mutation reaches the store.
//!
//! Each check appends its own message, so a payload violating several
//! constraints reports all of them at once.

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// The closed set of accepted task statuses.
pub const ALLOWED_STATUSES: [&str; 3] = ["En attente", "En cours", "Terminée"];

pub fn validate_task(
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();

    match title {
        None | Some("") => errors.push("Le titre est obligatoire.".to_string()),
        Some(title) if title.chars().count() > TITLE_MAX_LEN => {
            errors.push("Le titre ne peut pas dépasser 100 caractères.".to_string());
        }
        Some(_) => {}
    }

    match description {
        None | Some("") => errors.push("La description est obligatoire.".to_string()),
        Some(description) if description.chars().count() > DESCRIPTION_MAX_LEN => {
            errors.push("La description ne peut pas dépasser 500 caractères.".to_string());
        }
        Some(_) => {}
    }

    match status {
        None | Some("") => errors.push("Le statut est obligatoire.".to_string()),
        Some(status) if !ALLOWED_STATUSES.contains(&status) => {
            errors.push(
                "Le statut doit être 'En attente', 'En cours' ou 'Terminée'.".to_string(),
            );
        }
        Some(_) => {}
    }

    errors
}

pub fn validate_user(name: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();
    if name.map_or(true, str::is_empty) {
        errors.push("Le nom est obligatoire.".to_string());
    }
    errors
}

pub fn validate_comment(content: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();
    if content.map_or(true, str::is_empty) {
        errors.push("Le contenu est obligatoire.".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_task_passes() {
        let errors = validate_task(Some("Faire les courses"), Some("Acheter du pain"), Some("En cours"));
        assert!(errors.is_empty());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = validate_task(None, None, None);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("titre")));
        assert!(errors.iter().any(|e| e.contains("description")));
        assert!(errors.iter().any(|e| e.contains("statut")));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(TITLE_MAX_LEN + 1);
        let errors = validate_task(Some(&title), Some("desc"), Some("En attente"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("100"));
    }

    #[test]
    fn title_at_limit_is_accepted() {
        let title = "x".repeat(TITLE_MAX_LEN);
        let errors = validate_task(Some(&title), Some("desc"), Some("Terminée"));
        assert!(errors.is_empty());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let errors = validate_task(Some("t"), Some("d"), Some("Annulée"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("statut"));
    }

    #[test]
    fn empty_status_reports_required_only() {
        let errors = validate_task(Some("t"), Some("d"), Some(""));
        assert_eq!(errors, vec!["Le statut est obligatoire.".to_string()]);
    }

    #[test]
    fn user_name_is_required() {
        assert_eq!(validate_user(None).len(), 1);
        assert_eq!(validate_user(Some("")).len(), 1);
        assert!(validate_user(Some("Alice")).is_empty());
    }

    #[test]
    fn comment_content_is_required() {
        assert_eq!(validate_comment(Some("")).len(), 1);
        assert!(validate_comment(Some("ok")).is_empty());
    }
}
