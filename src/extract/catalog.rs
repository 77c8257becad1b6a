//! Static identifier catalog for the fund detail page.
//!
//! Every extracted field is keyed by a fixed element id in the page markup.
//! If the site changes these ids, extraction fails; there is no fallback.

/// (field name, element id) pairs, in output column order.
pub const SINGLE_VALUE_FIELDS: &[(&str, &str)] = &[
    // ── Headline numbers under the title ──
    ("inception_return", "ctl00_MainContent_txtInceptionReturn"),
    ("ytd_return", "ctl00_MainContent_txtYTDReturn"),
    ("navps", "ctl00_MainContent_txtNavps"),
    ("change", "ctl00_MainContent_txtNavpsChange"),
    // ── Info table beside the growth chart ──
    ("mer", "ctl00_MainContent_txtMER"),
    ("assets", "ctl00_MainContent_txtAssets"),
    ("rank", "ctl00_MainContent_txtRank"),
    ("std_dev", "ctl00_MainContent_txtStdDev"),
    ("volatility_rank", "ctl00_MainContent_txtVolatilityRank"),
    ("load", "ctl00_MainContent_txtLoad"),
    ("max_front_end", "ctl00_MainContent_txtFeesFront"),
    ("max_back_end", "ctl00_MainContent_txtFeesBack"),
    ("sales_status", "ctl00_MainContent_txtSalesStatus"),
    // ── Info panel below the growth chart ──
    ("objective_description", "ctl00_MainContent_txtObjective"),
    ("management_co", "ctl00_MainContent_txtManagementCo"),
    ("fund_managers", "ctl00_MainContent_txtManagers"),
    // ── Trailing returns: fund ──
    ("fund_1month_return", "ctl00_MainContent_txtFS1mthRtn"),
    ("fund_3month_return", "ctl00_MainContent_txtFS3mthRtn"),
    ("fund_6month_return", "ctl00_MainContent_txtFS6mthRtn"),
    ("fund_ytd_return", "ctl00_MainContent_txtFSytdRtn"),
    ("fund_1year_return", "ctl00_MainContent_txtFC1yrRtn"),
    ("fund_3year_return", "ctl00_MainContent_txtFC3yrRtn"),
    ("fund_5year_return", "ctl00_MainContent_txtFC5yrRtn"),
    ("fund_10year_return", "ctl00_MainContent_txtFC10yrRtn"),
    // ── Trailing returns: benchmark ──
    ("benchmark_1month_return", "ctl00_MainContent_txtIS1mthRtn"),
    ("benchmark_3month_return", "ctl00_MainContent_txtIS3mthRtn"),
    ("benchmark_6month_return", "ctl00_MainContent_txtIS6mthRtn"),
    ("benchmark_ytd_return", "ctl00_MainContent_txtISytdRtn"),
    ("benchmark_1year_return", "ctl00_MainContent_txtIC1yrRtn"),
    ("benchmark_3year_return", "ctl00_MainContent_txtIC3yrRtn"),
    ("benchmark_5year_return", "ctl00_MainContent_txtIC5yrRtn"),
    ("benchmark_10year_return", "ctl00_MainContent_txtIC10yrRtn"),
    // ── Trailing returns: quartile rank ──
    ("quartile_rank_1month_return", "ctl00_MainContent_txtS1mthqrank"),
    ("quartile_rank_3month_return", "ctl00_MainContent_txtS3mthqrank"),
    ("quartile_rank_6month_return", "ctl00_MainContent_txtS6mthqrank"),
    ("quartile_rank_ytd_return", "ctl00_MainContent_txtSytdrank"),
    ("quartile_rank_1year_return", "ctl00_MainContent_txtC1yrqrank"),
    ("quartile_rank_3year_return", "ctl00_MainContent_txtC3yrqrank"),
    ("quartile_rank_5year_return", "ctl00_MainContent_txtC5yrqrank"),
    ("quartile_rank_10year_return", "ctl00_MainContent_txtC10yrqrank"),
    // ── Calendar returns: fund, most recent year first ──
    ("fund_calendar_return_year_1", "ctl00_MainContent_txtCalRtnyr1"),
    ("fund_calendar_return_year_2", "ctl00_MainContent_txtCalRtnyr2"),
    ("fund_calendar_return_year_3", "ctl00_MainContent_txtCalRtnyr3"),
    ("fund_calendar_return_year_4", "ctl00_MainContent_txtCalRtnyr4"),
    ("fund_calendar_return_year_5", "ctl00_MainContent_txtCalRtnyr5"),
    ("fund_calendar_return_year_6", "ctl00_MainContent_txtCalRtnyr6"),
    ("fund_calendar_return_year_7", "ctl00_MainContent_txtCalRtnyr7"),
    ("fund_calendar_return_year_8", "ctl00_MainContent_txtCalRtnyr8"),
    ("fund_calendar_return_year_9", "ctl00_MainContent_txtCalRtnyr9"),
    ("fund_calendar_return_year_10", "ctl00_MainContent_txtCalRtnyr10"),
    // ── Calendar returns: benchmark ──
    ("benchmark_calendar_return_year_1", "ctl00_MainContent_txtBCalRtnyr1"),
    ("benchmark_calendar_return_year_2", "ctl00_MainContent_txtBCalRtnyr2"),
    ("benchmark_calendar_return_year_3", "ctl00_MainContent_txtBCalRtnyr3"),
    ("benchmark_calendar_return_year_4", "ctl00_MainContent_txtBCalRtnyr4"),
    ("benchmark_calendar_return_year_5", "ctl00_MainContent_txtBCalRtnyr5"),
    ("benchmark_calendar_return_year_6", "ctl00_MainContent_txtBCalRtnyr6"),
    ("benchmark_calendar_return_year_7", "ctl00_MainContent_txtBCalRtnyr7"),
    ("benchmark_calendar_return_year_8", "ctl00_MainContent_txtBCalRtnyr8"),
    ("benchmark_calendar_return_year_9", "ctl00_MainContent_txtBCalRtnyr9"),
    ("benchmark_calendar_return_year_10", "ctl00_MainContent_txtBCalRtnyr10"),
    // ── Calendar returns: quartile rank ──
    ("quartile_rank_calendar_return_year_1", "ctl00_MainContent_txtQCalrtnyr1"),
    ("quartile_rank_calendar_return_year_2", "ctl00_MainContent_txtQCalrtnyr2"),
    ("quartile_rank_calendar_return_year_3", "ctl00_MainContent_txtQCalrtnyr3"),
    ("quartile_rank_calendar_return_year_4", "ctl00_MainContent_txtQCalrtnyr4"),
    ("quartile_rank_calendar_return_year_5", "ctl00_MainContent_txtQCalrtnyr5"),
    ("quartile_rank_calendar_return_year_6", "ctl00_MainContent_txtQCalrtnyr6"),
    ("quartile_rank_calendar_return_year_7", "ctl00_MainContent_txtQCalrtnyr7"),
    ("quartile_rank_calendar_return_year_8", "ctl00_MainContent_txtQCalrtnyr8"),
    ("quartile_rank_calendar_return_year_9", "ctl00_MainContent_txtQCalrtnyr9"),
    ("quartile_rank_calendar_return_year_10", "ctl00_MainContent_txtQCalrtnyr10"),
];

pub const ASSET_ALLOCATION_MAP: &str = "ctl00$MainContent$chrtAssetAllocationImageMap";
pub const SECTOR_ALLOCATION_MAP: &str = "ctl00$MainContent$chrtSectorAllocationImageMap";
pub const GEO_ALLOCATION_MAP: &str = "ctl00$MainContent$chrtGeoAllocationImageMap";

pub const TOP_HOLDINGS_TABLE: &str = "ctl00_MainContent_gvTopTenHoldings";
