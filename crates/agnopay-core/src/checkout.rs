//! # Checkout Embedding
//!
//! Everything needed to embed the hosted checkout page, independent of how
//! it ends up on screen: the iframe URL, the fixed iframe attributes and the
//! inline styles of the surrounding container.
//!
//! ```text
//! wrapper (full-height, centered)
//! └── card
//!     ├── header (optional)
//!     │   └── h1 title
//!     └── frame container
//!         └── iframe  {wallet}/orders/{order_id}?primaryColor=...
//! ```
//!
//! The browser widget builds this tree in the DOM; [`CheckoutFrame::render_html`]
//! renders the same tree as static markup.

use crate::config::SdkConfig;
use crate::error::{AgnoPayError, AgnoPayResult};
use crate::style::IframeStyle;
use url::Url;

/// Sandbox tokens granted to the checkout iframe
pub const CHECKOUT_SANDBOX: &str =
    "allow-same-origin allow-scripts allow-forms allow-popups allow-popups-to-escape-sandbox";

/// Permissions policy for the checkout iframe
pub const CHECKOUT_ALLOW: &str = "payment";

/// Accessible title of the iframe element
pub const CHECKOUT_IFRAME_TITLE: &str = "AgnoPay Checkout";

/// Header title used when none is given
pub const DEFAULT_CHECKOUT_TITLE: &str = "Complete Your Purchase";

const DEFAULT_HEADER_BACKGROUND: &str =
    "linear-gradient(to right, rgb(37, 99, 235), rgb(147, 51, 234))";
const DEFAULT_PAGE_BACKGROUND: &str = "#f9fafb";
const DEFAULT_CARD_BACKGROUND: &str = "white";
const DEFAULT_CARD_SHADOW: &str = "0 20px 25px -5px rgba(0,0,0,0.1)";
const DEFAULT_TEXT_COLOR: &str = "white";
const DEFAULT_FONT_FAMILY: &str = "system-ui, -apple-system, sans-serif";

/// Inline CSS declarations, `(property, value)` with kebab-case properties
pub type StyleDecls = Vec<(&'static str, String)>;

/// Build the hosted checkout URL for an order.
///
/// The order id is appended as a single path segment after `orders/`; every
/// present style field becomes a query parameter.
pub fn checkout_url(
    wallet_url: &str,
    order_id: &str,
    style: Option<&IframeStyle>,
) -> AgnoPayResult<Url> {
    let mut url = Url::parse(wallet_url)?;

    url.path_segments_mut()
        .map_err(|_| {
            AgnoPayError::Configuration(format!("wallet URL cannot be a base: {}", wallet_url))
        })?
        .pop_if_empty()
        .push("orders")
        .push(order_id);

    let pairs = style.map(IframeStyle::query_pairs).unwrap_or_default();
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (name, value) in &pairs {
            query.append_pair(name, value);
        }
    }

    Ok(url)
}

/// Caller-facing options for one embedded checkout
#[derive(Debug, Clone)]
pub struct CheckoutOptions {
    pub order_id: String,
    /// Header title; an empty title hides the header
    pub title: String,
    pub hide_header: bool,
    pub style: IframeStyle,
}

impl CheckoutOptions {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            title: DEFAULT_CHECKOUT_TITLE.to_string(),
            hide_header: false,
            style: IframeStyle::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_hide_header(mut self, hide: bool) -> Self {
        self.hide_header = hide;
        self
    }

    pub fn with_style(mut self, style: IframeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn shows_header(&self) -> bool {
        !self.hide_header && !self.title.is_empty()
    }
}

/// Header block above the iframe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub title: String,
    pub header: StyleDecls,
    pub heading: StyleDecls,
}

/// Resolved inline styles for every element of the embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLayout {
    pub wrapper: StyleDecls,
    pub card: StyleDecls,
    pub header: Option<HeaderLayout>,
    pub frame_container: StyleDecls,
    pub frame: StyleDecls,
}

impl CheckoutLayout {
    /// Resolve the layout, filling every unset style field with its default
    pub fn resolve(options: &CheckoutOptions) -> Self {
        let style = &options.style;
        let transparent = style.is_transparent();

        // `background_color` only travels to the hosted page as a query parameter
        let page_background = if transparent {
            "transparent"
        } else {
            DEFAULT_PAGE_BACKGROUND
        };

        let wrapper = vec![
            ("min-height", "100vh".to_string()),
            ("display", "flex".to_string()),
            ("align-items", "center".to_string()),
            ("justify-content", "center".to_string()),
            ("padding", "1rem".to_string()),
            ("background-color", page_background.to_string()),
        ];

        let card = vec![
            ("width", "100%".to_string()),
            ("max-width", "1024px".to_string()),
            ("border-radius", "0.5rem".to_string()),
            (
                "background-color",
                (if transparent { "transparent" } else { DEFAULT_CARD_BACKGROUND }).to_string(),
            ),
            (
                "box-shadow",
                (if transparent { "none" } else { DEFAULT_CARD_SHADOW }).to_string(),
            ),
            ("overflow", "hidden".to_string()),
        ];

        let header = options.shows_header().then(|| HeaderLayout {
            title: options.title.clone(),
            header: vec![
                ("padding", "1rem".to_string()),
                ("background", or_default(&style.primary_color, DEFAULT_HEADER_BACKGROUND)),
            ],
            heading: vec![
                ("font-size", "1.5rem".to_string()),
                ("font-weight", "bold".to_string()),
                ("text-align", "center".to_string()),
                ("color", or_default(&style.text_color, DEFAULT_TEXT_COLOR)),
                ("font-family", or_default(&style.font_family, DEFAULT_FONT_FAMILY)),
                ("margin", "0".to_string()),
            ],
        });

        let frame_height = if options.hide_header {
            "100vh"
        } else {
            "calc(100vh - 200px)"
        };

        let frame_container = vec![
            ("position", "relative".to_string()),
            ("width", "100%".to_string()),
            ("height", frame_height.to_string()),
            ("min-height", "500px".to_string()),
        ];

        let frame = vec![
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("border", "0".to_string()),
        ];

        Self {
            wrapper,
            card,
            header,
            frame_container,
            frame,
        }
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Render declarations as an inline `style` attribute value
pub fn inline_style(decls: &StyleDecls) -> String {
    decls
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fully resolved checkout embed for one order
#[derive(Debug, Clone)]
pub struct CheckoutFrame {
    pub order_id: String,
    pub src: Url,
    pub layout: CheckoutLayout,
}

impl CheckoutFrame {
    pub fn new(config: &SdkConfig, options: &CheckoutOptions) -> AgnoPayResult<Self> {
        let src = checkout_url(&config.wallet_url, &options.order_id, Some(&options.style))?;

        Ok(Self {
            order_id: options.order_id.clone(),
            src,
            layout: CheckoutLayout::resolve(options),
        })
    }

    /// Render the embed as static markup
    pub fn render_html(&self) -> String {
        let layout = &self.layout;

        let header = layout
            .header
            .as_ref()
            .map(|h| {
                format!(
                    r#"<div style="{}"><h1 style="{}">{}</h1></div>"#,
                    html_escape(&inline_style(&h.header)),
                    html_escape(&inline_style(&h.heading)),
                    html_escape(&h.title),
                )
            })
            .unwrap_or_default();

        format!(
            r#"<div style="{wrapper}"><div style="{card}">{header}<div style="{container}"><iframe src="{src}" title="{title}" sandbox="{sandbox}" allow="{allow}" style="{frame}"></iframe></div></div></div>"#,
            wrapper = html_escape(&inline_style(&layout.wrapper)),
            card = html_escape(&inline_style(&layout.card)),
            header = header,
            container = html_escape(&inline_style(&layout.frame_container)),
            src = html_escape(self.src.as_str()),
            title = CHECKOUT_IFRAME_TITLE,
            sandbox = CHECKOUT_SANDBOX,
            allow = CHECKOUT_ALLOW,
            frame = html_escape(&inline_style(&layout.frame)),
        )
    }
}

/// Escape text for HTML content and double-quoted attributes
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
