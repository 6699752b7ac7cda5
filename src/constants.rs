//! Application constants for the WITS trade processor
//!
//! Indicator names and sentinels used by the WITS "At-a-Glance" extracts,
//! scaling and filtering defaults, and the built-in country tables.

// =============================================================================
// WITS Field Values
// =============================================================================

/// Partner value used for a reporter's aggregate totals
pub const PARTNER_WORLD: &str = "World";

/// Partner value WITS uses when the counterpart was not reported
pub const PARTNER_UNSPECIFIED: &str = "Unspecified";

/// Product category carrying aggregate (all-goods) figures
pub const ALL_PRODUCTS: &str = "All Products";

/// Indicator for total exports, in millions of US$
pub const INDICATOR_TOTAL_EXPORTS: &str = "Exports (in US$ Mil)";

/// Indicator for total imports, in millions of US$
pub const INDICATOR_TOTAL_IMPORTS: &str = "Imports (in US$ Mil)";

/// Substring marking a top-5 export partner row
pub const INDICATOR_TOP_EXPORT_PARTNER: &str = "Top 5 Export Partner";

/// Substring marking a top-5 import partner row
pub const INDICATOR_TOP_IMPORT_PARTNER: &str = "Top 5 Import Partner";

/// Column headers of a WITS At-a-Glance extract
pub mod columns {
    pub const REPORTER: &str = "Reporter";
    pub const YEAR: &str = "Year";
    pub const PARTNER: &str = "Partner";
    pub const PRODUCT_CATEGORIES: &str = "Product categories";
    pub const INDICATOR_TYPE: &str = "Indicator Type";
    pub const INDICATOR: &str = "Indicator";
    pub const INDICATOR_VALUE: &str = "Indicator Value";

    /// Columns that must be present for a file to be usable
    pub const REQUIRED: &[&str] = &[
        REPORTER,
        YEAR,
        PARTNER,
        PRODUCT_CATEGORIES,
        INDICATOR,
        INDICATOR_VALUE,
    ];
}

// =============================================================================
// Processing Defaults
// =============================================================================

/// Source values are reported in millions of currency units
pub const DEFAULT_VALUE_SCALE: f64 = 1e6;

/// Minimum connection value (base currency units); retained values must exceed it
pub const DEFAULT_MATERIALITY_THRESHOLD: f64 = 1e8;

/// Partners kept per direction on a trade record
pub const DEFAULT_TOP_PARTNERS: usize = 5;

/// Default per-country file name; `{code}` is replaced by the country code
pub const DEFAULT_FILE_PATTERN: &str = "{code}.csv";

/// Placeholder substituted in file patterns
pub const CODE_PLACEHOLDER: &str = "{code}";

// =============================================================================
// Country Tables
// =============================================================================

/// Statistical-source codes with a per-country extract in the WITS corpus
pub const COUNTRY_CODES: &[&str] = &[
    "ABW", "AFG", "AGO", "AIA", "ALB", "AND", "ANT", "ARE", "ARG", "ARM", "ATG",
    "AUS", "AUT", "AZE", "BDI", "BEL", "BEN", "BFA", "BGD", "BGR", "BHR", "BHS",
    "BIH", "BLR", "BLX", "BLZ", "BMU", "BOL", "BRA", "BRB", "BRN", "BTN", "BWA",
    "CAF", "CAN", "CHE", "CHL", "CHN", "CIV", "CMR", "COG", "COK", "COL", "COM",
    "CPV", "CRI", "CUB", "CYM", "CYP", "CZE", "DEU", "DJI", "DMA", "DNK", "DOM",
    "DZA", "ECU", "EGY", "ERI", "ESP", "EST", "ETH", "FIN", "FJI", "FRA", "FRO",
    "FSM", "GAB", "GBR", "GEO", "GHA", "GIN", "GLP", "GMB", "GNB", "GRC", "GRD",
    "GRL", "GTM", "GUF", "GUY", "HKG", "HND", "HRV", "HUN", "IDN", "IND", "IRL",
    "IRN", "IRQ", "ISL", "ISR", "ITA", "JAM", "JOR", "JPN", "KAZ", "KEN", "KGZ",
    "KHM", "KIR", "KNA", "KOR", "KWT", "LBN", "LBY", "LCA", "LKA", "LSO", "LTU",
    "LUX", "LVA", "MAC", "MAR", "MDA", "MDG", "MDV", "MEX", "MKD", "MLI", "MLT",
    "MMR", "MNG", "MOZ", "MRT", "MSR", "MTQ", "MUS", "MWI", "MYS", "MYT", "NAM",
    "NCL", "NER", "NGA", "NIC", "NLD", "NOR", "NPL", "NZL", "OMN", "PAK", "PAN",
    "PER", "PHL", "PLW", "PNG", "POL", "PRT", "PRY", "PSE", "PYF", "QAT", "REU",
    "ROM", "RUS", "RWA", "SAU", "SDN", "SEN", "SER", "SGP", "SLB", "SLE", "SLV",
    "STP", "SUR", "SVK", "SVN", "SWE", "SWZ", "SYC", "SYR", "TCA", "TCD", "TGO",
    "THA", "TJK", "TKM", "TMP", "TON", "TTO", "TUN", "TUR", "TUV", "TZA", "UGA",
    "UKR", "URY", "USA", "VCT", "VEN", "VNM", "VUT", "WLF", "WSM", "YEM", "ZAF",
    "ZMB", "ZWE",
];

/// Statistical-source code, geographic (ISO3) code, display name
pub const CODE_MAPPINGS: &[(&str, &str, &str)] = &[
    ("ABW", "ABW", "Aruba"),
    ("AFG", "AFG", "Afghanistan"),
    ("AGO", "AGO", "Angola"),
    ("AIA", "AIA", "Anguilla"),
    ("ALB", "ALB", "Albania"),
    ("AND", "AND", "Andorra"),
    ("ANT", "ANT", "Netherlands Antilles"),
    ("ARE", "ARE", "UAE"),
    ("ARG", "ARG", "Argentina"),
    ("ARM", "ARM", "Armenia"),
    ("ATG", "ATG", "Antigua and Barbuda"),
    ("AUS", "AUS", "Australia"),
    ("AUT", "AUT", "Austria"),
    ("AZE", "AZE", "Azerbaijan"),
    ("BDI", "BDI", "Burundi"),
    ("BEL", "BEL", "Belgium"),
    ("BEN", "BEN", "Benin"),
    ("BFA", "BFA", "Burkina Faso"),
    ("BGD", "BGD", "Bangladesh"),
    ("BGR", "BGR", "Bulgaria"),
    ("BHR", "BHR", "Bahrain"),
    ("BHS", "BHS", "Bahamas"),
    ("BIH", "BIH", "Bosnia and Herzegovina"),
    ("BLR", "BLR", "Belarus"),
    ("BLZ", "BLZ", "Belize"),
    ("BMU", "BMU", "Bermuda"),
    ("BOL", "BOL", "Bolivia"),
    ("BRA", "BRA", "Brazil"),
    ("BRB", "BRB", "Barbados"),
    ("BRN", "BRN", "Brunei"),
    ("BTN", "BTN", "Bhutan"),
    ("BWA", "BWA", "Botswana"),
    ("CAF", "CAF", "Central African Republic"),
    ("CAN", "CAN", "Canada"),
    ("CHE", "CHE", "Switzerland"),
    ("CHL", "CHL", "Chile"),
    ("CHN", "CHN", "China"),
    ("CIV", "CIV", "Côte d'Ivoire"),
    ("CMR", "CMR", "Cameroon"),
    ("COD", "COD", "DR Congo"),
    ("COG", "COG", "Congo"),
    ("COK", "COK", "Cook Islands"),
    ("COL", "COL", "Colombia"),
    ("COM", "COM", "Comoros"),
    ("CPV", "CPV", "Cape Verde"),
    ("CRI", "CRI", "Costa Rica"),
    ("CUB", "CUB", "Cuba"),
    ("CYM", "CYM", "Cayman Islands"),
    ("CYP", "CYP", "Cyprus"),
    ("CZE", "CZE", "Czech Republic"),
    ("DEU", "DEU", "Germany"),
    ("DJI", "DJI", "Djibouti"),
    ("DMA", "DMA", "Dominica"),
    ("DNK", "DNK", "Denmark"),
    ("DOM", "DOM", "Dominican Republic"),
    ("DZA", "DZA", "Algeria"),
    ("ECU", "ECU", "Ecuador"),
    ("EGY", "EGY", "Egypt"),
    ("ERI", "ERI", "Eritrea"),
    ("ESP", "ESP", "Spain"),
    ("EST", "EST", "Estonia"),
    ("ETH", "ETH", "Ethiopia"),
    ("FIN", "FIN", "Finland"),
    ("FJI", "FJI", "Fiji"),
    ("FRA", "FRA", "France"),
    ("FRO", "FRO", "Faroe Islands"),
    ("FSM", "FSM", "Micronesia"),
    ("GAB", "GAB", "Gabon"),
    ("GBR", "GBR", "United Kingdom"),
    ("GEO", "GEO", "Georgia"),
    ("GHA", "GHA", "Ghana"),
    ("GIN", "GIN", "Guinea"),
    ("GMB", "GMB", "Gambia"),
    ("GNB", "GNB", "Guinea-Bissau"),
    ("GNQ", "GNQ", "Equatorial Guinea"),
    ("GRC", "GRC", "Greece"),
    ("GRD", "GRD", "Grenada"),
    ("GRL", "GRL", "Greenland"),
    ("GTM", "GTM", "Guatemala"),
    ("GUY", "GUY", "Guyana"),
    ("HKG", "HKG", "Hong Kong"),
    ("HND", "HND", "Honduras"),
    ("HRV", "HRV", "Croatia"),
    ("HTI", "HTI", "Haiti"),
    ("HUN", "HUN", "Hungary"),
    ("IDN", "IDN", "Indonesia"),
    ("IND", "IND", "India"),
    ("IRL", "IRL", "Ireland"),
    ("IRN", "IRN", "Iran"),
    ("IRQ", "IRQ", "Iraq"),
    ("ISL", "ISL", "Iceland"),
    ("ISR", "ISR", "Israel"),
    ("ITA", "ITA", "Italy"),
    ("JAM", "JAM", "Jamaica"),
    ("JOR", "JOR", "Jordan"),
    ("JPN", "JPN", "Japan"),
    ("KAZ", "KAZ", "Kazakhstan"),
    ("KEN", "KEN", "Kenya"),
    ("KGZ", "KGZ", "Kyrgyzstan"),
    ("KHM", "KHM", "Cambodia"),
    ("KIR", "KIR", "Kiribati"),
    ("KNA", "KNA", "Saint Kitts and Nevis"),
    ("KOR", "KOR", "South Korea"),
    ("KWT", "KWT", "Kuwait"),
    ("LAO", "LAO", "Laos"),
    ("LBN", "LBN", "Lebanon"),
    ("LBR", "LBR", "Liberia"),
    ("LBY", "LBY", "Libya"),
    ("LCA", "LCA", "Saint Lucia"),
    ("LKA", "LKA", "Sri Lanka"),
    ("LSO", "LSO", "Lesotho"),
    ("LTU", "LTU", "Lithuania"),
    ("LUX", "LUX", "Luxembourg"),
    ("LVA", "LVA", "Latvia"),
    ("MAC", "MAC", "Macao"),
    ("MAR", "MAR", "Morocco"),
    ("MDA", "MDA", "Moldova"),
    ("MDG", "MDG", "Madagascar"),
    ("MDV", "MDV", "Maldives"),
    ("MEX", "MEX", "Mexico"),
    ("MKD", "MKD", "North Macedonia"),
    ("MLI", "MLI", "Mali"),
    ("MLT", "MLT", "Malta"),
    ("MMR", "MMR", "Myanmar"),
    ("MNG", "MNG", "Mongolia"),
    ("MOZ", "MOZ", "Mozambique"),
    ("MRT", "MRT", "Mauritania"),
    ("MSR", "MSR", "Montserrat"),
    ("MUS", "MUS", "Mauritius"),
    ("MWI", "MWI", "Malawi"),
    ("MYS", "MYS", "Malaysia"),
    ("NAM", "NAM", "Namibia"),
    ("NCL", "NCL", "New Caledonia"),
    ("NER", "NER", "Niger"),
    ("NGA", "NGA", "Nigeria"),
    ("NIC", "NIC", "Nicaragua"),
    ("NLD", "NLD", "Netherlands"),
    ("NOR", "NOR", "Norway"),
    ("NPL", "NPL", "Nepal"),
    ("NZL", "NZL", "New Zealand"),
    ("OMN", "OMN", "Oman"),
    ("PAK", "PAK", "Pakistan"),
    ("PAN", "PAN", "Panama"),
    ("PER", "PER", "Peru"),
    ("PHL", "PHL", "Philippines"),
    ("PNG", "PNG", "Papua New Guinea"),
    ("POL", "POL", "Poland"),
    ("PRI", "PRI", "Puerto Rico"),
    ("PRT", "PRT", "Portugal"),
    ("PRY", "PRY", "Paraguay"),
    ("PSE", "PSE", "Palestine"),
    ("QAT", "QAT", "Qatar"),
    ("ROU", "ROU", "Romania"),
    ("RUS", "RUS", "Russia"),
    ("RWA", "RWA", "Rwanda"),
    ("SAU", "SAU", "Saudi Arabia"),
    ("SDN", "SDN", "Sudan"),
    ("SEN", "SEN", "Senegal"),
    ("SGP", "SGP", "Singapore"),
    ("SLB", "SLB", "Solomon Islands"),
    ("SLE", "SLE", "Sierra Leone"),
    ("SLV", "SLV", "El Salvador"),
    ("SOM", "SOM", "Somalia"),
    ("SRB", "SRB", "Serbia"),
    ("SSD", "SSD", "South Sudan"),
    ("STP", "STP", "São Tomé and Príncipe"),
    ("SUR", "SUR", "Suriname"),
    ("SVK", "SVK", "Slovakia"),
    ("SVN", "SVN", "Slovenia"),
    ("SWE", "SWE", "Sweden"),
    ("SWZ", "SWZ", "Eswatini"),
    ("SYC", "SYC", "Seychelles"),
    ("SYR", "SYR", "Syria"),
    ("TCD", "TCD", "Chad"),
    ("TGO", "TGO", "Togo"),
    ("THA", "THA", "Thailand"),
    ("TJK", "TJK", "Tajikistan"),
    ("TKM", "TKM", "Turkmenistan"),
    ("TLS", "TLS", "Timor-Leste"),
    ("TON", "TON", "Tonga"),
    ("TTO", "TTO", "Trinidad and Tobago"),
    ("TUN", "TUN", "Tunisia"),
    ("TUR", "TUR", "Turkey"),
    ("TUV", "TUV", "Tuvalu"),
    ("TWN", "TWN", "Taiwan"),
    ("TZA", "TZA", "Tanzania"),
    ("UGA", "UGA", "Uganda"),
    ("UKR", "UKR", "Ukraine"),
    ("URY", "URY", "Uruguay"),
    ("840", "USA", "United States"),
    ("UZB", "UZB", "Uzbekistan"),
    ("VCT", "VCT", "Saint Vincent and the Grenadines"),
    ("VEN", "VEN", "Venezuela"),
    ("VNM", "VNM", "Vietnam"),
    ("VUT", "VUT", "Vanuatu"),
    ("WSM", "WSM", "Samoa"),
    ("YEM", "YEM", "Yemen"),
    ("ZAF", "ZAF", "South Africa"),
    ("ZMB", "ZMB", "Zambia"),
    ("ZWE", "ZWE", "Zimbabwe"),
];

/// Historical, superseded or aggregate codes
pub struct AliasGroup {
    pub canonical: &'static str,
    pub name: &'static str,
    pub codes: &'static [&'static str],
}

pub const ALIAS_GROUPS: &[AliasGroup] = &[
    AliasGroup {
        canonical: "ROU",
        name: "Romania",
        codes: &["ROM", "ROU"],
    },
    AliasGroup {
        canonical: "TLS",
        name: "Timor-Leste",
        codes: &["TMP", "TLS"],
    },
    AliasGroup {
        canonical: "COD",
        name: "DR Congo",
        codes: &["ZAR", "COD"],
    },
    AliasGroup {
        canonical: "MMR",
        name: "Myanmar",
        codes: &["BUR", "MMR"],
    },
    // Regional groupings that show up as partners
    AliasGroup {
        canonical: "EU",
        name: "European Union",
        codes: &["EUN"],
    },
    AliasGroup {
        canonical: "WLD",
        name: "World",
        codes: &["WLD"],
    },
];

/// Country centroids as (code, latitude, longitude)
pub const COUNTRY_COORDINATES: &[(&str, f64, f64)] = &[
    ("USA", 37.0902, -95.7129),
    ("CHN", 35.8617, 104.1954),
    ("JPN", 36.2048, 138.2529),
    ("DEU", 51.1657, 10.4515),
    ("GBR", 55.3781, -3.4360),
    ("FRA", 46.2276, 2.2137),
    ("IND", 20.5937, 78.9629),
    ("ITA", 41.8719, 12.5674),
    ("BRA", -14.2350, -51.9253),
    ("CAN", 56.1304, -106.3468),
    ("RUS", 61.5240, 105.3188),
    ("KOR", 35.9078, 127.7669),
    ("AUS", -25.2744, 133.7751),
    ("ESP", 40.4637, -3.7492),
    ("MEX", 23.6345, -102.5528),
    ("IDN", -0.7893, 113.9213),
    ("NLD", 52.1326, 5.2913),
    ("SAU", 23.8859, 45.0792),
    ("CHE", 46.8182, 8.2275),
    ("TUR", 38.9637, 35.2433),
];
