//! # Iframe Style Configuration
//!
//! Cosmetic parameters forwarded to the hosted checkout page as query
//! parameters and used for the surrounding container.

use serde::{Deserialize, Serialize};

/// Optional visual parameters for the embedded checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IframeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl IframeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = Some(transparent);
        self
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_border_radius(mut self, radius: impl Into<String>) -> Self {
        self.border_radius = Some(radius.into());
        self
    }

    pub fn with_font_family(mut self, font: impl Into<String>) -> Self {
        self.font_family = Some(font.into());
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent.unwrap_or(false)
    }

    /// Query parameters for the checkout URL, in a fixed order.
    ///
    /// `transparent` is emitted whenever it is set; string fields only when
    /// set and non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(transparent) = self.transparent {
            pairs.push(("transparent", transparent.to_string()));
        }

        let fields = [
            ("primaryColor", &self.primary_color),
            ("backgroundColor", &self.background_color),
            ("textColor", &self.text_color),
            ("borderRadius", &self.border_radius),
            ("fontFamily", &self.font_family),
        ];
        for (name, value) in fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, value.to_string()));
            }
        }

        pairs
    }
}
