//! CSS selectors for the storefront's rendered layout.
//!
//! The class names carry CSS-module hash suffixes; they change when the
//! storefront ships a new build, so they are kept in one place.

pub const SIDEBAR: &str = ".DesktopScreen_sidebar__vUXIl";
pub const EMPTY_ADDRESS_PLUG: &str = ".EmptyAddressPlug_map__IMk_l";
pub const SUGGEST_PANEL: &str = ".AddressSuggest_root__9pSaE";
pub const ADDRESS_FORM: &str = ".AddressCreation_root__RdVV2";
pub const ADDRESS_INFO: &str = ".AddressCreation_info__tX0zZ";
pub const CITY_INPUT_CONTAINER: &str = "._textInputContainer--size-m_1frhv_1";
pub const SUGGEST_REGION: &str = ".Suggest_root__KuclW";
pub const SUGGEST_ITEM: &str = ".Suggest_suggestItem__hOaW9";

pub const CATALOG_SECTION: &str = ".CatalogTreeSectionCard_categories__4uYFm";
pub const CATEGORY_TITLE: &str = ".CategoryPage_categoryNameContainer__C35DT";
pub const PRODUCT_LIST: &str = ".ProductsList_productList__XIJx_";
pub const PRODUCT_NAME: &str = ".ProductCard_name__czrVx";
pub const PRODUCT_ACTIONS: &str = ".ProductCard_actions__2AbGZ";
pub const PRODUCT_IMAGE: &str = ".ProductCardImage_root__b96bY";

pub const ANCHOR: &str = "a";
pub const BUTTON: &str = "button";
pub const IMAGE: &str = "img";
pub const INPUT: &str = "input";
pub const SPAN: &str = "span";
