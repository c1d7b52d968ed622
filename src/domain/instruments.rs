//! Static instrument tables: which series, tickers and pages each command reads.

/// One maturity on a country's curve, with every identifier we know for it.
#[derive(Debug, Clone, Copy)]
pub struct BondSpec {
    pub period: u32,
    pub name: &'static str,
    /// Yahoo Finance tickers, primary first.
    pub yahoo: &'static [&'static str],
    /// Investing.com `rates-bonds/{slug}` page slugs, primary first.
    pub investing: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct CountryBonds {
    pub key: &'static str,
    pub name: &'static str,
    pub name_ja: &'static str,
    /// Words that identify this country in a free-text instrument description.
    pub keywords: &'static [&'static str],
    pub bonds: &'static [BondSpec],
}

impl CountryBonds {
    pub fn find(&self, period: u32) -> Option<&BondSpec> {
        self.bonds.iter().find(|b| b.period == period)
    }
}

pub const BOND_COUNTRIES: &[CountryBonds] = &[
    CountryBonds {
        key: "japan",
        name: "Japan",
        name_ja: "日本",
        keywords: &["Japan", "JGB", "JP"],
        bonds: &[
            BondSpec { period: 2, name: "Japan 2Y", yahoo: &["^JP6MEUR", "JGB2Y=F"], investing: &["japan-2-year-bond-yield"] },
            BondSpec { period: 5, name: "Japan 5Y", yahoo: &["^JP5MEUR", "JGB5Y=F"], investing: &["japan-5-year-bond-yield"] },
            BondSpec { period: 10, name: "Japan 10Y", yahoo: &["^JP10MEUR", "JGB=F", "JGB10Y=F"], investing: &["japan-10-year-bond-yield"] },
            BondSpec { period: 20, name: "Japan 20Y", yahoo: &["^JP20MEUR", "JGB20Y=F"], investing: &["japan-20-year-bond-yield"] },
            BondSpec { period: 30, name: "Japan 30Y", yahoo: &["^JP30MEUR", "JGB30Y=F"], investing: &["japan-30-year-bond-yield"] },
        ],
    },
    CountryBonds {
        key: "united states",
        name: "United States",
        name_ja: "米国",
        keywords: &["United States", "U.S.", "US", "USA", "Treasury"],
        bonds: &[
            BondSpec { period: 2, name: "US 2Y", yahoo: &["2YY=F", "US2Y=F"], investing: &["u.s.-2-year-bond-yield", "us-2-yr-t-note"] },
            BondSpec { period: 5, name: "US 5Y", yahoo: &["^FVX", "US5Y=F"], investing: &["u.s.-5-year-bond-yield", "us-5-yr-t-note"] },
            BondSpec { period: 10, name: "US 10Y", yahoo: &["^TNX", "US10Y=F"], investing: &["u.s.-10-year-bond-yield", "us-10-yr-t-note"] },
            BondSpec { period: 30, name: "US 30Y", yahoo: &["^TYX", "US30Y=F"], investing: &["u.s.-30-year-bond-yield", "us-30-yr-t-bond"] },
        ],
    },
    CountryBonds {
        key: "germany",
        name: "Germany",
        name_ja: "ドイツ",
        keywords: &["Germany", "German", "Bund", "DE"],
        bonds: &[
            BondSpec { period: 2, name: "Germany 2Y", yahoo: &["TMBMKDE-02Y", "BUND2Y=F"], investing: &["germany-2-year-bond-yield"] },
            BondSpec { period: 5, name: "Germany 5Y", yahoo: &["TMBMKDE-05Y", "BUND5Y=F"], investing: &["germany-5-year-bond-yield"] },
            BondSpec { period: 10, name: "Germany 10Y", yahoo: &["TMBMKDE-10Y", "BUND10Y=F"], investing: &["germany-10-year-bond-yield"] },
            BondSpec { period: 30, name: "Germany 30Y", yahoo: &["TMBMKDE-30Y"], investing: &["germany-30-year-bond-yield"] },
        ],
    },
    CountryBonds {
        key: "france",
        name: "France",
        name_ja: "フランス",
        keywords: &["France", "French", "OAT", "FR"],
        bonds: &[
            BondSpec { period: 2, name: "France 2Y", yahoo: &["TMBMKFR-02Y", "OAT2Y=F"], investing: &["france-2-year-bond-yield"] },
            BondSpec { period: 5, name: "France 5Y", yahoo: &["TMBMKFR-05Y", "OAT5Y=F"], investing: &["france-5-year-bond-yield"] },
            BondSpec { period: 10, name: "France 10Y", yahoo: &["TMBMKFR-10Y", "OAT10Y=F"], investing: &["france-10-year-bond-yield"] },
        ],
    },
    CountryBonds {
        key: "united kingdom",
        name: "United Kingdom",
        name_ja: "イギリス",
        keywords: &["United Kingdom", "U.K.", "UK", "GB", "Gilt"],
        bonds: &[
            BondSpec { period: 2, name: "UK 2Y", yahoo: &["TMBMKGB-02Y", "GILT2Y=F"], investing: &["uk-2-year-bond-yield", "u.k.-2-year-bond-yield"] },
            BondSpec { period: 5, name: "UK 5Y", yahoo: &["TMBMKGB-05Y", "GILT5Y=F"], investing: &["uk-5-year-bond-yield", "u.k.-5-year-bond-yield"] },
            BondSpec { period: 10, name: "UK 10Y", yahoo: &["TMBMKGB-10Y", "GILT10Y=F"], investing: &["uk-10-year-bond-yield", "u.k.-10-year-bond-yield"] },
        ],
    },
    CountryBonds {
        key: "australia",
        name: "Australia",
        name_ja: "オーストラリア",
        keywords: &["Australia", "Australian", "AU"],
        bonds: &[
            BondSpec { period: 2, name: "Australia 2Y", yahoo: &["TMBMKAU-02Y", "AU2Y=F"], investing: &["australia-2-year-bond-yield"] },
            BondSpec { period: 5, name: "Australia 5Y", yahoo: &["TMBMKAU-05Y", "AU5Y=F"], investing: &["australia-5-year-bond-yield"] },
            BondSpec { period: 10, name: "Australia 10Y", yahoo: &["TMBMKAU-10Y", "AU10Y=F"], investing: &["australia-10-year-bond-yield"] },
        ],
    },
];

pub fn bond_country(key: &str) -> Option<&'static CountryBonds> {
    let key = key.trim().to_lowercase();
    BOND_COUNTRIES.iter().find(|c| c.key == key)
}

/// FRED series fetched by `mkt indicators`: (display name, series id).
pub const FRED_INDICATORS: &[(&str, &str)] = &[
    ("GDP", "GDP"),
    ("UNRATE", "UNRATE"),
    ("CPIAUCSL", "CPIAUCSL"),
    ("PAYEMS", "PAYEMS"),
    ("FEDFUNDS", "FEDFUNDS"),
    ("UMCSENT", "UMCSENT"),
    ("INDPRO", "INDPRO"),
    ("RSXFS", "RSXFS"),
    ("HOUST", "HOUST"),
    ("M2SL", "M2SL"),
    ("DFII10", "DFII10"),
];

/// FRED release ids tracked by `mkt releases`: (release id, display name).
pub const FRED_MAJOR_RELEASES: &[(u32, &str)] = &[
    (82, "Gross Domestic Product"),
    (7, "Unemployment Rate"),
    (10, "Consumer Price Index"),
    (170, "Payroll Employment"),
    (18, "Federal Funds Target Rate"),
    (173, "Housing Starts"),
    (175, "Building Permits"),
    (199, "Retail Sales"),
    (168, "Producer Price Index"),
    (268, "Consumer Sentiment"),
];

/// Where a country-level indicator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalSource {
    Fred,
    Oecd,
    WorldBank,
}

impl GlobalSource {
    pub fn display_name(self) -> &'static str {
        match self {
            GlobalSource::Fred => "FRED API",
            GlobalSource::Oecd => "OECD",
            GlobalSource::WorldBank => "World Bank",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlobalRegion {
    pub key: &'static str,
    pub label: &'static str,
    pub source: GlobalSource,
    /// Code the source uses for the region (`JPN`, `EA19`, `CN`; unused for FRED).
    pub code: &'static str,
    /// (indicator display name, source-specific id)
    pub indicators: &'static [(&'static str, &'static str)],
}

pub const GLOBAL_REGIONS: &[GlobalRegion] = &[
    GlobalRegion {
        key: "usa",
        label: "USA",
        source: GlobalSource::Fred,
        code: "US",
        indicators: &[
            ("GDP", "GDP"),
            ("Unemployment Rate", "UNRATE"),
            ("CPI", "CPIAUCSL"),
            ("Federal Funds Rate", "FEDFUNDS"),
        ],
    },
    GlobalRegion {
        key: "japan",
        label: "Japan",
        source: GlobalSource::Oecd,
        code: "JPN",
        indicators: &[
            ("GDP Growth", "QNA"),
            ("Unemployment Rate", "STLABOUTLUR"),
            ("CPI", "PRICES_CPI"),
        ],
    },
    GlobalRegion {
        key: "eu",
        label: "EU",
        source: GlobalSource::Oecd,
        code: "EA19",
        indicators: &[("GDP Growth", "QNA"), ("Unemployment Rate", "STLABOUTLUR")],
    },
    GlobalRegion {
        key: "china",
        label: "China",
        source: GlobalSource::WorldBank,
        code: "CN",
        indicators: &[
            ("GDP Growth", "NY.GDP.MKTP.KD.ZG"),
            ("Unemployment Rate", "SL.UEM.TOTL.ZS"),
            ("Inflation Rate", "FP.CPI.TOTL.ZG"),
        ],
    },
];

/// A named group of Yahoo instruments for `mkt markets`.
#[derive(Debug, Clone, Copy)]
pub struct MarketGroup {
    pub key: &'static str,
    pub title: &'static str,
    /// (symbol, display name)
    pub symbols: &'static [(&'static str, &'static str)],
    /// Values are quoted in percent (yields) rather than price.
    pub is_rate: bool,
}

pub const MARKET_GROUPS: &[MarketGroup] = &[
    MarketGroup {
        key: "treasury_yields",
        title: "US Treasury Yields",
        symbols: &[("^IRX", "13-Week Bill"), ("^FVX", "5-Year Note"), ("^TNX", "10-Year Note"), ("^TYX", "30-Year Bond")],
        is_rate: true,
    },
    MarketGroup {
        key: "market_indices",
        title: "Market Indices",
        symbols: &[("^GSPC", "S&P 500"), ("^DJI", "Dow Jones"), ("^IXIC", "NASDAQ"), ("^VIX", "VIX")],
        is_rate: false,
    },
    MarketGroup {
        key: "commodities",
        title: "Commodities",
        symbols: &[("GC=F", "Gold"), ("SI=F", "Silver"), ("CL=F", "WTI Crude"), ("NG=F", "Natural Gas")],
        is_rate: false,
    },
];

/// Sites tried by `mkt check`: (display name, url).
pub const CHECK_SITES: &[(&str, &str)] = &[
    ("HTTP Test", "https://httpbin.org/get"),
    ("Google", "https://www.google.com"),
    ("Investing.com", "https://www.investing.com"),
    ("TradingView", "https://www.tradingview.com"),
    ("FRED API", "https://api.stlouisfed.org/fred/series/observations?series_id=GDP&api_key=guest&limit=1"),
];

/// Countries scraped by `mkt investing` by default: (Investing.com country name, short code).
pub const CALENDAR_COUNTRIES: &[(&str, &str)] = &[
    ("japan", "jp"),
    ("united kingdom", "uk"),
    ("united states", "us"),
];

/// Countries queried by `mkt forecast --major`: (Trading Economics name, label).
pub const FORECAST_MAJOR_COUNTRIES: &[(&str, &str)] = &[
    ("united states", "USA"),
    ("japan", "Japan"),
    ("china", "China"),
    ("united kingdom", "UK"),
    ("euro area", "EU"),
    ("germany", "Germany"),
];
