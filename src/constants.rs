//! Constants used throughout the crate
//!
//! Class names, event names and attribute names shared between the
//! foundations and the components that host them. They follow the material
//! naming scheme so markup written for the web components works unchanged.

// Drawer classes
pub const DRAWER_ROOT: &str = "mdc-drawer";
pub const DRAWER_DISMISSIBLE: &str = "mdc-drawer--dismissible";
pub const DRAWER_MODAL: &str = "mdc-drawer--modal";
pub const DRAWER_OPEN: &str = "mdc-drawer--open";
pub const DRAWER_OPENING: &str = "mdc-drawer--opening";
pub const DRAWER_CLOSING: &str = "mdc-drawer--closing";
pub const DRAWER_ANIMATE: &str = "mdc-drawer--animate";

// Drawer strings
pub const DRAWER_SCRIM_SELECTOR: &str = ".mdc-drawer-scrim";
pub const DRAWER_OPEN_EVENT: &str = "MDCDrawer:opened";
pub const DRAWER_CLOSE_EVENT: &str = "MDCDrawer:closed";

// List
pub const LIST_ITEM_ACTIVATED_CLASS: &str = "mdc-list-item--activated";

// Dialog classes
pub const DIALOG_ROOT: &str = "mdc-dialog";
pub const DIALOG_OPEN: &str = "mdc-dialog--open";
pub const DIALOG_OPENING: &str = "mdc-dialog--opening";
pub const DIALOG_CLOSING: &str = "mdc-dialog--closing";
pub const DIALOG_SCROLL_LOCK: &str = "mdc-dialog-scroll-lock";
pub const DIALOG_CONTAINER: &str = "mdc-dialog__container";
pub const DIALOG_SURFACE: &str = "mdc-dialog__surface";
pub const DIALOG_CONTENT: &str = "mdc-dialog__content";
pub const DIALOG_SCRIM: &str = "mdc-dialog__scrim";

// Dialog strings
pub const DIALOG_OPENING_EVENT: &str = "MDCDialog:opening";
pub const DIALOG_OPENED_EVENT: &str = "MDCDialog:opened";
pub const DIALOG_CLOSING_EVENT: &str = "MDCDialog:closing";
pub const DIALOG_CLOSED_EVENT: &str = "MDCDialog:closed";
pub const DIALOG_ACTION_ATTRIBUTE: &str = "data-mdc-dialog-action";
pub const DIALOG_INITIAL_FOCUS_ATTRIBUTE: &str = "data-mdc-dialog-initial-focus";
pub const DIALOG_CLOSE_ACTION: &str = "close";
pub const DIALOG_DESTROY_ACTION: &str = "destroy";

// Templating
pub const DEFAULT_SLOT_KEY: &str = "__au-default-slot-key__";
pub const TRIGGER_SUFFIX: &str = ".trigger";
pub const HANDLE_CLOSING_METHOD: &str = "handleClosing";

// Keys
pub const KEY_ESCAPE: &str = "Escape";

// Configuration defaults
pub const CONFIG_FILE_NAME: &str = "overlaykit.toml";
pub const CONFIG_DIR_NAME: &str = "overlaykit";
pub const LOG_FILE_NAME: &str = "overlaykit.log";
