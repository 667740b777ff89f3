//! The uniform result envelope every command returns.

use serde::Serialize;

/// Advisory hint for the hosting terminal about a non-textual side
/// effect. The engine itself performs none of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiAction {
    /// Clear the screen.
    Clear,
    /// Reload the hosting page/process.
    Reload,
    /// Close the terminal.
    Exit,
    /// Switch the text color (the chosen color rides in the envelope).
    Color,
    /// Open the URL carried in `output`.
    Open,
}

/// Result of one command: success with output, or failure with a
/// diagnostic. Never partially filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<UiAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CommandResult {
    /// Success with textual output.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            action: None,
            color: None,
        }
    }

    /// Success carrying a UI action hint.
    pub fn action(output: impl Into<String>, action: UiAction) -> Self {
        Self {
            success: true,
            output: output.into(),
            action: Some(action),
            color: None,
        }
    }

    /// Success of the `color` command, carrying the chosen color.
    pub fn color_change(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            success: true,
            output: format!("Color changed to {}", color),
            action: Some(UiAction::Color),
            color: Some(color),
        }
    }

    /// Failure with a human-readable diagnostic.
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            action: None,
            color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_shape() {
        let result = CommandResult::ok("done");
        assert!(result.success);
        assert_eq!(result.output, "done");
        assert!(result.action.is_none());
        assert!(result.color.is_none());
    }

    #[test]
    fn test_color_change_carries_color_and_action() {
        let result = CommandResult::color_change("green");
        assert!(result.success);
        assert_eq!(result.action, Some(UiAction::Color));
        assert_eq!(result.color.as_deref(), Some("green"));
        assert_eq!(result.output, "Color changed to green");
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let json = serde_json::to_string(&CommandResult::ok("hi")).unwrap();
        assert_eq!(json, r#"{"success":true,"output":"hi"}"#);

        let json = serde_json::to_string(&CommandResult::action("", UiAction::Clear)).unwrap();
        assert!(json.contains(r#""action":"clear""#));
    }
}
