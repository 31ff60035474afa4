#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingKind {
    Highlight,
    Note,
    Bookmark,
    Unknown,
}

/// One highlight, note or bookmark as read from the clippings export.
///
/// Page, location and date are kept verbatim; the device prints them in
/// localized formats that are not worth reparsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingRecord {
    pub title: String,
    pub author: String,
    pub kind: ClippingKind,
    pub page: Option<String>,
    pub location: Option<String>,
    pub added: Option<String>,
    pub body: String,
}

/// All clippings of one book, in the order they appear in the export.
#[derive(Debug, Clone, PartialEq)]
pub struct BookGroup {
    pub title: String,
    pub author: String,
    pub records: Vec<ClippingRecord>,
}
