//! ARIA Support
//!
//! ARIA roles and the live-region vocabulary.

use serde::{Deserialize, Serialize};

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Live region roles
    Alert,
    Log,
    Marquee,
    Status,
    Timer,

    // Window roles
    AlertDialog,
    Dialog,
    ToolTip,

    // Widget roles
    Button,
    Checkbox,
    Combobox,
    Grid,
    GridCell,
    Link,
    Listbox,
    Menu,
    MenuBar,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Meter,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    SearchBox,
    Separator,
    Slider,
    SpinButton,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Tree,
    TreeGrid,
    TreeItem,

    // Document structure
    Article,
    Cell,
    ColumnHeader,
    Document,
    Figure,
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Row,
    RowGroup,
    RowHeader,
    Table,
    Toolbar,
    Application,
    Generic,
}

const ROLE_NAMES: &[(&str, AriaRole)] = &[
    ("banner", AriaRole::Banner),
    ("complementary", AriaRole::Complementary),
    ("contentinfo", AriaRole::ContentInfo),
    ("form", AriaRole::Form),
    ("main", AriaRole::Main),
    ("navigation", AriaRole::Navigation),
    ("region", AriaRole::Region),
    ("search", AriaRole::Search),
    ("alert", AriaRole::Alert),
    ("log", AriaRole::Log),
    ("marquee", AriaRole::Marquee),
    ("status", AriaRole::Status),
    ("timer", AriaRole::Timer),
    ("alertdialog", AriaRole::AlertDialog),
    ("dialog", AriaRole::Dialog),
    ("tooltip", AriaRole::ToolTip),
    ("button", AriaRole::Button),
    ("checkbox", AriaRole::Checkbox),
    ("combobox", AriaRole::Combobox),
    ("grid", AriaRole::Grid),
    ("gridcell", AriaRole::GridCell),
    ("link", AriaRole::Link),
    ("listbox", AriaRole::Listbox),
    ("menu", AriaRole::Menu),
    ("menubar", AriaRole::MenuBar),
    ("menuitem", AriaRole::MenuItem),
    ("menuitemcheckbox", AriaRole::MenuItemCheckbox),
    ("menuitemradio", AriaRole::MenuItemRadio),
    ("meter", AriaRole::Meter),
    ("option", AriaRole::Option),
    ("progressbar", AriaRole::ProgressBar),
    ("radio", AriaRole::Radio),
    ("radiogroup", AriaRole::RadioGroup),
    ("scrollbar", AriaRole::ScrollBar),
    ("searchbox", AriaRole::SearchBox),
    ("separator", AriaRole::Separator),
    ("slider", AriaRole::Slider),
    ("spinbutton", AriaRole::SpinButton),
    ("switch", AriaRole::Switch),
    ("tab", AriaRole::Tab),
    ("tablist", AriaRole::TabList),
    ("tabpanel", AriaRole::TabPanel),
    ("textbox", AriaRole::TextBox),
    ("tree", AriaRole::Tree),
    ("treegrid", AriaRole::TreeGrid),
    ("treeitem", AriaRole::TreeItem),
    ("article", AriaRole::Article),
    ("cell", AriaRole::Cell),
    ("columnheader", AriaRole::ColumnHeader),
    ("document", AriaRole::Document),
    ("figure", AriaRole::Figure),
    ("group", AriaRole::Group),
    ("heading", AriaRole::Heading),
    ("img", AriaRole::Img),
    ("list", AriaRole::List),
    ("listitem", AriaRole::ListItem),
    ("presentation", AriaRole::Presentation),
    ("none", AriaRole::Presentation),
    ("row", AriaRole::Row),
    ("rowgroup", AriaRole::RowGroup),
    ("rowheader", AriaRole::RowHeader),
    ("table", AriaRole::Table),
    ("toolbar", AriaRole::Toolbar),
    ("application", AriaRole::Application),
    ("generic", AriaRole::Generic),
];

impl AriaRole {
    /// Parse a single role token
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        ROLE_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, role)| role)
    }

    /// First recognized token of a `role` attribute value
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.split_whitespace().find_map(Self::parse)
    }

    /// Canonical role name
    pub fn as_str(&self) -> &'static str {
        ROLE_NAMES
            .iter()
            .find(|&&(_, role)| role == *self)
            .map(|&(name, _)| name)
            .unwrap_or("generic")
    }

    /// Check if role is widget (interactive)
    pub fn is_widget(&self) -> bool {
        matches!(self,
            Self::Button | Self::Checkbox | Self::Combobox | Self::Grid |
            Self::GridCell | Self::Link | Self::Listbox | Self::Menu |
            Self::MenuBar | Self::MenuItem | Self::MenuItemCheckbox |
            Self::MenuItemRadio | Self::Option | Self::Radio |
            Self::RadioGroup | Self::ScrollBar | Self::SearchBox |
            Self::Slider | Self::SpinButton | Self::Switch | Self::Tab |
            Self::TabList | Self::TextBox | Self::Tree |
            Self::TreeGrid | Self::TreeItem
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }

    /// Check if role is live region
    pub fn is_live_region(&self) -> bool {
        matches!(self, Self::Alert | Self::Log | Self::Marquee | Self::Status | Self::Timer)
    }

    /// Check if role is part of table structure
    pub fn is_table_part(&self) -> bool {
        matches!(self,
            Self::Table | Self::Grid | Self::TreeGrid | Self::Cell | Self::GridCell |
            Self::ColumnHeader | Self::RowHeader
        )
    }

    /// Check if role supports name from content
    pub fn supports_name_from_content(&self) -> bool {
        matches!(self,
            Self::Button | Self::Cell | Self::Checkbox | Self::ColumnHeader |
            Self::GridCell | Self::Heading | Self::Link | Self::MenuItem |
            Self::MenuItemCheckbox | Self::MenuItemRadio | Self::Option |
            Self::Radio | Self::RowHeader | Self::Switch | Self::Tab |
            Self::ToolTip | Self::TreeItem
        )
    }
}

/// Politeness of a live-region update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveLevel {
    Polite,
    Assertive,
}

/// Live region relevant values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRelevant {
    Additions,
    Removals,
    Text,
    All,
}

impl LiveRelevant {
    /// Parse the whitespace-separated `aria-relevant` value
    pub fn parse_list(value: &str) -> Vec<Self> {
        value
            .split_whitespace()
            .filter_map(|token| match token {
                "additions" => Some(Self::Additions),
                "removals" => Some(Self::Removals),
                "text" => Some(Self::Text),
                "all" => Some(Self::All),
                _ => None,
            })
            .collect()
    }
}
