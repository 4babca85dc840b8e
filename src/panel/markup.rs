// Structure of the panel form installed into the view.

use ratatui::style::Color;

use crate::models::ThemeConfig;
use crate::protocol::Command;

pub const PANEL_TITLE: &str = "Planto.AI";
pub const PROMPT_PLACEHOLDER: &str = "Enter your prompt here...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub command: Command,
    pub color: Color,
}

/// Title, prompt field, four action buttons and an output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelMarkup {
    pub title: &'static str,
    pub placeholder: &'static str,
    pub title_color: Color,
    pub border_color: Color,
    pub buttons: Vec<ButtonSpec>,
}

impl PanelMarkup {
    pub fn render(theme: &ThemeConfig) -> Self {
        let buttons = Command::ALL
            .into_iter()
            .map(|command| {
                let color = match command {
                    Command::ExplainCode => &theme.explain_color,
                    Command::GenerateCode => &theme.generate_color,
                    Command::DebugCode => &theme.debug_color,
                    Command::RunCode => &theme.run_color,
                };
                ButtonSpec {
                    label: command.label(),
                    command,
                    color: parse_color(color, Color::Gray),
                }
            })
            .collect();

        Self {
            title: PANEL_TITLE,
            placeholder: PROMPT_PLACEHOLDER,
            title_color: parse_color(&theme.title_color, Color::White),
            border_color: parse_color(&theme.border_color, Color::Gray),
            buttons,
        }
    }

    pub fn button_command(&self, index: usize) -> Option<Command> {
        self.buttons.get(index).map(|button| button.command)
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(color = value, "unrecognized style colour");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_markup() {
        let markup = PanelMarkup::render(&ThemeConfig::default());

        assert_eq!(markup.title, "Planto.AI");
        let labels: Vec<_> = markup.buttons.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            ["Explain Code", "Generate Code", "Debug Code", "Run Code"]
        );
        assert_eq!(markup.buttons[0].color, Color::Rgb(0x00, 0x7a, 0xcc));
        assert_eq!(markup.button_command(1), Some(Command::GenerateCode));
        assert_eq!(markup.button_command(4), None);
    }

    #[test]
    fn test_unparseable_colour_falls_back() {
        let theme = ThemeConfig {
            run_color: "not-a-colour".to_string(),
            ..Default::default()
        };
        let markup = PanelMarkup::render(&theme);
        assert_eq!(markup.buttons[3].color, Color::Gray);
    }
}
