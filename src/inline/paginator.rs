//! Multi-page screens behind a navigation keyboard.
//!
//! Pagination state is not stored anywhere: every navigation button carries a
//! [`PageRequest`] for its target page, so a click rebuilds the whole page from
//! the continuation alone.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::button::{Button, CallbackButton};
use super::continuation::Continuation;
use super::error::PaginateError;

/// Navigation buttons per row unless the caller says otherwise.
pub const DEFAULT_ROW_WIDTH: usize = 5;

/// Collections up to this many pages get one button per page.
pub const FLAT_PAGE_LIMIT: usize = 5;

/// Width of the head and tail bands in windowed navigation.
const EDGE_PAGES: usize = 3;

/// Address of a page: 1-based position or key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    /// 1-based page position.
    Number(usize),
    /// Page key.
    Key(String),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Number(number) => write!(f, "{number}"),
            PageRef::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<usize> for PageRef {
    fn from(number: usize) -> Self {
        PageRef::Number(number)
    }
}

impl From<&str> for PageRef {
    fn from(key: &str) -> Self {
        PageRef::Key(key.to_string())
    }
}

impl From<String> for PageRef {
    fn from(key: String) -> Self {
        PageRef::Key(key)
    }
}

/// Page bodies, either positional or keyed (insertion order is navigation order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pages", rename_all = "snake_case")]
pub enum Screens {
    /// Pages addressed by 1-based position.
    Ordered(Vec<String>),
    /// Pages addressed by key, as `(key, body)` pairs.
    Keyed(Vec<(String, String)>),
}

impl Screens {
    /// Collection of positional pages.
    pub fn ordered<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Screens::Ordered(pages.into_iter().map(Into::into).collect())
    }

    /// Collection of keyed pages, navigated in the given order.
    pub fn keyed<I, K, V>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Screens::Keyed(
            pages
                .into_iter()
                .map(|(key, body)| (key.into(), body.into()))
                .collect(),
        )
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        match self {
            Screens::Ordered(pages) => pages.len(),
            Screens::Keyed(pages) => pages.len(),
        }
    }

    /// True when there are no pages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The page to show for a request, falling back to the first page when the
    /// request is absent, out of range, or of the wrong kind for this collection.
    pub fn resolve_page(&self, requested: Option<&PageRef>) -> Option<PageRef> {
        match self {
            Screens::Ordered(pages) => {
                if pages.is_empty() {
                    return None;
                }
                match requested {
                    Some(PageRef::Number(n)) if (1..=pages.len()).contains(n) => {
                        Some(PageRef::Number(*n))
                    }
                    _ => Some(PageRef::Number(1)),
                }
            }
            Screens::Keyed(pages) => {
                let first = pages.first().map(|(key, _)| PageRef::Key(key.clone()));
                match requested {
                    Some(PageRef::Key(key)) if pages.iter().any(|(k, _)| k == key) => {
                        Some(PageRef::Key(key.clone()))
                    }
                    _ => first,
                }
            }
        }
    }

    /// Body of `page`, if it exists in this collection.
    pub fn body(&self, page: &PageRef) -> Option<&str> {
        match (self, page) {
            (Screens::Ordered(pages), PageRef::Number(n)) => {
                n.checked_sub(1).and_then(|i| pages.get(i)).map(String::as_str)
            }
            (Screens::Keyed(pages), PageRef::Key(key)) => pages
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, body)| body.as_str()),
            _ => None,
        }
    }
}

/// Caller-supplied rows around the navigation grid.
///
/// Rendered top to bottom as `up`, the current page's `up_per_page` rows,
/// navigation, the current page's `down_per_page` rows, then `down`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraRows {
    /// Rows above everything else.
    pub up: Vec<Vec<Button>>,
    /// Rows shown above navigation on one page only.
    pub up_per_page: Vec<(PageRef, Vec<Vec<Button>>)>,
    /// Rows below navigation on one page only.
    pub down_per_page: Vec<(PageRef, Vec<Vec<Button>>)>,
    /// Rows below everything else.
    pub down: Vec<Vec<Button>>,
}

impl ExtraRows {
    fn for_page<'a>(
        per_page: &'a [(PageRef, Vec<Vec<Button>>)],
        page: &'a PageRef,
    ) -> impl Iterator<Item = &'a Vec<Button>> {
        per_page
            .iter()
            .filter(move |(key, _)| key == page)
            .flat_map(|(_, rows)| rows.iter())
    }
}

/// One navigation button before it is bound to a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    /// Text on the button.
    pub label: String,
    /// Page the button opens.
    pub target: PageRef,
}

impl NavButton {
    fn new(label: impl Into<String>, target: PageRef) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

/// Body text plus the full button grid of one rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page text.
    pub body: String,
    /// Full keyboard, extras included.
    pub rows: Vec<Vec<Button>>,
}

/// Everything needed to draw one page, and to redraw any other page.
///
/// Fields are private so every instance, deserialized ones included, has gone
/// through [`PageRequest::new`]: the collection is non-empty, the page exists
/// and the row width is at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PageRequestFields")]
pub struct PageRequest {
    screens: Screens,
    page: PageRef,
    row_width: usize,
    extras: ExtraRows,
}

/// Wire shape of a [`PageRequest`] before validation.
#[derive(Deserialize)]
struct PageRequestFields {
    screens: Screens,
    #[serde(default)]
    page: Option<PageRef>,
    #[serde(default = "default_row_width")]
    row_width: usize,
    #[serde(default)]
    extras: ExtraRows,
}

fn default_row_width() -> usize {
    DEFAULT_ROW_WIDTH
}

impl TryFrom<PageRequestFields> for PageRequest {
    type Error = PaginateError;

    fn try_from(fields: PageRequestFields) -> Result<Self, Self::Error> {
        PageRequest::new(fields.screens, fields.page, fields.row_width, fields.extras)
    }
}

impl PageRequest {
    /// Validate the collection and resolve the first page to show.
    pub fn new(
        screens: Screens,
        page: Option<PageRef>,
        row_width: usize,
        extras: ExtraRows,
    ) -> Result<Self, PaginateError> {
        let page = screens
            .resolve_page(page.as_ref())
            .ok_or(PaginateError::EmptyScreens)?;
        Ok(Self {
            screens,
            page,
            row_width: row_width.max(1),
            extras,
        })
    }

    /// The paged collection.
    pub fn screens(&self) -> &Screens {
        &self.screens
    }

    /// The page this request draws.
    pub fn page(&self) -> &PageRef {
        &self.page
    }

    /// Navigation buttons per row, never zero.
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Caller rows around navigation.
    pub fn extras(&self) -> &ExtraRows {
        &self.extras
    }

    /// Same pagination context, different page.
    ///
    /// A page missing from the collection falls back to the first one.
    pub fn goto(&self, page: PageRef) -> Self {
        let page = self.screens.resolve_page(Some(&page)).unwrap_or(page);
        Self {
            page,
            ..self.clone()
        }
    }

    /// Body of the current page.
    pub fn body(&self) -> &str {
        self.screens.body(&self.page).unwrap_or_default()
    }

    /// Navigation buttons for the current page, unchunked.
    pub fn navigation(&self) -> Vec<NavButton> {
        match (&self.screens, &self.page) {
            (Screens::Keyed(pages), current) => pages
                .iter()
                .map(|(key, _)| {
                    let target = PageRef::Key(key.clone());
                    let label = if &target == current {
                        highlight(key)
                    } else {
                        key.clone()
                    };
                    NavButton::new(label, target)
                })
                .collect(),
            (Screens::Ordered(pages), PageRef::Number(current)) => {
                sequence_navigation(pages.len(), *current)
            }
            (Screens::Ordered(pages), PageRef::Key(_)) => sequence_navigation(pages.len(), 1),
        }
    }

    /// Body and button grid, with a fresh page-rebuild callback per nav button.
    pub fn layout(&self) -> PageLayout {
        let nav: Vec<Button> = self
            .navigation()
            .into_iter()
            .map(|nav| {
                let label = format!("page {}", nav.target);
                CallbackButton::new(nav.label, Continuation::ShowPage(self.goto(nav.target)))
                    .with_label(label)
                    .into()
            })
            .collect();

        let mut rows: Vec<Vec<Button>> = Vec::new();
        rows.extend(self.extras.up.iter().cloned());
        rows.extend(ExtraRows::for_page(&self.extras.up_per_page, &self.page).cloned());
        rows.extend(nav.chunks(self.row_width.max(1)).map(<[Button]>::to_vec));
        rows.extend(ExtraRows::for_page(&self.extras.down_per_page, &self.page).cloned());
        rows.extend(self.extras.down.iter().cloned());

        PageLayout {
            body: self.body().to_string(),
            rows,
        }
    }
}

fn highlight(label: impl fmt::Display) -> String {
    format!("· {label} ·")
}

/// Navigation for a positional collection of `total` pages.
///
/// Up to five pages get a button each. Past that the keyboard is a five-slot
/// window with `«`/`»` jumps to the ends and `‹`/`›` steps to the neighbours.
pub fn sequence_navigation(total: usize, current: usize) -> Vec<NavButton> {
    let page = |n: usize| {
        let label = if n == current {
            highlight(n)
        } else {
            n.to_string()
        };
        NavButton::new(label, PageRef::Number(n))
    };

    if total <= FLAT_PAGE_LIMIT {
        return (1..=total).map(page).collect();
    }

    if current <= EDGE_PAGES {
        return vec![
            page(1),
            page(2),
            page(3),
            NavButton::new("4 ›", PageRef::Number(4)),
            NavButton::new(format!("{total} »"), PageRef::Number(total)),
        ];
    }

    if current > total - EDGE_PAGES {
        return vec![
            NavButton::new("« 1", PageRef::Number(1)),
            page(total - 2),
            page(total - 1),
            page(total),
        ];
    }

    vec![
        NavButton::new("« 1", PageRef::Number(1)),
        NavButton::new(format!("‹ {}", current - 1), PageRef::Number(current - 1)),
        page(current),
        NavButton::new(format!("{} ›", current + 1), PageRef::Number(current + 1)),
        NavButton::new(format!("{total} »"), PageRef::Number(total)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(nav: &[NavButton]) -> Vec<&str> {
        nav.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_flat_navigation_up_to_five_pages() {
        assert_eq!(labels(&sequence_navigation(1, 1)), vec!["· 1 ·"]);
        assert_eq!(
            labels(&sequence_navigation(5, 4)),
            vec!["1", "2", "3", "· 4 ·", "5"]
        );
    }

    #[test]
    fn test_head_band() {
        assert_eq!(
            labels(&sequence_navigation(10, 3)),
            vec!["1", "2", "· 3 ·", "4 ›", "10 »"]
        );
        let nav = sequence_navigation(10, 1);
        assert_eq!(nav[3].target, PageRef::Number(4));
        assert_eq!(nav[4].target, PageRef::Number(10));
    }

    #[test]
    fn test_middle_band_boundaries() {
        assert_eq!(
            labels(&sequence_navigation(10, 4)),
            vec!["« 1", "‹ 3", "· 4 ·", "5 ›", "10 »"]
        );
        assert_eq!(
            labels(&sequence_navigation(10, 7)),
            vec!["« 1", "‹ 6", "· 7 ·", "8 ›", "10 »"]
        );
    }

    #[test]
    fn test_tail_band() {
        assert_eq!(
            labels(&sequence_navigation(10, 8)),
            vec!["« 1", "· 8 ·", "9", "10"]
        );
        assert_eq!(
            labels(&sequence_navigation(6, 4)),
            vec!["« 1", "· 4 ·", "5", "6"]
        );
    }

    #[test]
    fn test_resolve_page_fallbacks() {
        let ordered = Screens::ordered(["a", "b"]);
        assert_eq!(ordered.resolve_page(None), Some(PageRef::Number(1)));
        assert_eq!(
            ordered.resolve_page(Some(&PageRef::Number(9))),
            Some(PageRef::Number(1))
        );
        assert_eq!(
            ordered.resolve_page(Some(&PageRef::from("b"))),
            Some(PageRef::Number(1))
        );

        let keyed = Screens::keyed([("x", "X"), ("y", "Y")]);
        assert_eq!(
            keyed.resolve_page(Some(&PageRef::Number(2))),
            Some(PageRef::from("x"))
        );
        assert_eq!(
            keyed.resolve_page(Some(&PageRef::from("y"))),
            Some(PageRef::from("y"))
        );
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let result = PageRequest::new(Screens::ordered(Vec::<String>::new()), None, 5, ExtraRows::default());
        assert_eq!(result, Err(PaginateError::EmptyScreens));
    }

    #[test]
    fn test_layout_orders_extra_rows() {
        let extras = ExtraRows {
            up: vec![vec![Button::data("up", "up")]],
            up_per_page: vec![
                (PageRef::Number(2), vec![vec![Button::data("up-2", "u2")]]),
                (PageRef::Number(1), vec![vec![Button::data("up-1", "u1")]]),
            ],
            down_per_page: vec![(PageRef::Number(2), vec![vec![Button::data("down-2", "d2")]])],
            down: vec![vec![Button::data("down", "down")]],
        };
        let request =
            PageRequest::new(Screens::ordered(["p1", "p2", "p3"]), Some(PageRef::Number(2)), 5, extras)
                .expect("non-empty screens");
        let layout = request.layout();

        let first_labels: Vec<&str> = layout.rows.iter().map(|row| row[0].text()).collect();
        assert_eq!(first_labels, vec!["up", "up-2", "1", "down-2", "down"]);
        assert_eq!(layout.body, "p2");
    }

    #[test]
    fn test_nav_buttons_rebuild_their_target_page() {
        let request = PageRequest::new(Screens::ordered(["p1", "p2"]), None, 5, ExtraRows::default())
            .expect("non-empty screens");
        let layout = request.layout();
        match &layout.rows[0][1] {
            Button::Callback(callback) => {
                assert!(!callback.reusable);
                assert!(callback.token.is_none());
                assert_eq!(
                    callback.continuation,
                    Continuation::ShowPage(request.goto(PageRef::Number(2)))
                );
            }
            other => panic!("expected callback button, got {other:?}"),
        }
    }

    #[test]
    fn test_row_width_chunks_navigation() {
        let request = PageRequest::new(
            Screens::keyed([("a", "A"), ("b", "B"), ("c", "C")]),
            None,
            2,
            ExtraRows::default(),
        )
        .expect("non-empty screens");
        let layout = request.layout();
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0][0].text(), "· a ·");
        assert_eq!(layout.rows[1][0].text(), "c");
    }
}
