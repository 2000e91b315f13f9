/// Base currency all catalog prices are entered in.
pub const DEFAULT_BASE_CURRENCY: &str = "INR";

/// Decimal precision for converted quote totals
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Name given to freshly added tree nodes
pub const DEFAULT_NODE_NAME: &str = "New Item";

/// Separator used when a selection path is rendered as text
pub const PATH_SEPARATOR: &str = " → ";

/// Prefix of generated quote numbers
pub const QUOTE_NUMBER_PREFIX: &str = "QT";

/// Number of quotes returned as "recent" in the quote summary
pub const RECENT_QUOTES_LIMIT: usize = 5;

/// Country for which a GST number is mandatory
pub const GST_COUNTRY: &str = "India";

/// Required GST number length
pub const GST_NUMBER_LENGTH: usize = 15;

// Stable catalog keys
pub const CATALOG_BODY: &str = "pricing_body";
pub const CATALOG_BONNET: &str = "pricing_bonnet";
pub const CATALOG_TRIM_PLUG: &str = "pricing_trim_plug";
pub const CATALOG_TRIM_SEAT: &str = "pricing_trim_seat";
pub const CATALOG_TRIM_STEM: &str = "pricing_trim_stem";
pub const CATALOG_TRIM_CAGE: &str = "pricing_trim_cage";
pub const CATALOG_FITTINGS: &str = "pricing_fittings";
pub const CATALOG_ACTUATOR: &str = "pricing_actuator";
pub const CATALOG_PAINTING: &str = "pricing_painting";

