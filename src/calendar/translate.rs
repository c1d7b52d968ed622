//! English → Japanese indicator names for the Investing.com calendar report.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

const TRANSLATIONS: &[(&str, &str)] = &[
    // United States
    ("JOLTS Job Openings", "JOLTS求人件数"),
    ("Jobless Claims 4-Week Avg.", "失業保険申請4週間平均"),
    ("Initial Jobless Claims", "新規失業保険申請件数"),
    ("Continuing Jobless Claims", "失業保険継続受給件数"),
    ("Challenger Job Cuts", "チャレンジャー解雇通知"),
    ("ADP Non-Farm Employment Change", "ADP雇用統計"),
    ("Non-Farm Payrolls", "非農業部門雇用者数"),
    ("Unemployment Rate", "失業率"),
    ("Labor Force Participation Rate", "労働参加率"),
    ("Average Hourly Earnings (MoM)", "平均時間給（前月比）"),
    ("Average Hourly Earnings (YoY)", "平均時間給（前年比）"),
    ("Natural Gas Storage", "天然ガス在庫"),
    ("EIA Crude Oil Inventories", "EIA原油在庫"),
    ("Crude Oil Inventories", "原油在庫"),
    ("Cushing Crude Oil Inventories", "クッシング原油在庫"),
    ("Gasoline Inventories", "ガソリン在庫"),
    ("API Weekly Crude Oil Stock", "API週間原油在庫"),
    ("10-Year Note Auction", "10年債入札"),
    ("30-Year Bond Auction", "30年債入札"),
    ("Fed Interest Rate Decision", "FF金利"),
    ("FOMC Meeting Minutes", "FOMC議事要旨"),
    ("Fed Chair Powell Speaks", "パウエルFRB議長講演"),
    ("CPI (YoY)", "CPI（前年比）"),
    ("CPI (MoM)", "CPI（前月比）"),
    ("Core CPI (YoY)", "コアCPI（前年比）"),
    ("Core CPI (MoM)", "コアCPI（前月比）"),
    ("PPI (MoM)", "企業物価指数（前月比）"),
    ("Core PPI (MoM)", "コアPPI（前月比）"),
    ("Retail Sales (MoM)", "小売売上高（前月比）"),
    ("Retail Sales (YoY)", "小売売上高（前年比）"),
    ("Core Retail Sales (MoM)", "コア小売売上高（前月比）"),
    ("GDP (QoQ)", "GDP（前期比）"),
    ("GDP (MoM)", "GDP（前月比）"),
    ("GDP (YoY)", "GDP（前年比）"),
    ("GDP Annualized", "GDP（年率）"),
    ("ISM Manufacturing PMI", "ISM製造業PMI"),
    ("ISM Non-Manufacturing PMI", "ISM非製造業PMI"),
    ("ISM Services PMI", "ISM非製造業PMI"),
    ("ISM Manufacturing Prices", "ISM製造業物価"),
    ("ISM Non-Manufacturing Prices", "ISM非製造業物価"),
    ("Philadelphia Fed Manufacturing Index", "フィラデルフィア連銀製造業指数"),
    ("NY Empire State Manufacturing Index", "NY連銀製造業景気指数"),
    ("Chicago PMI", "シカゴ購買部協会指数"),
    ("S&P Global Manufacturing PMI", "S&Pグローバル製造業PMI"),
    ("S&P Global Services PMI", "S&Pグローバルサービス業PMI"),
    ("S&P Global Composite PMI", "S&Pグローバル総合PMI"),
    ("S&P Global Construction PMI", "S&Pグローバル建設業PMI"),
    ("Michigan Consumer Sentiment", "ミシガン大学消費者信頼感指数"),
    ("Michigan 1-Year Inflation Expectations", "ミシガン大学1年インフレ期待"),
    ("Michigan 5-Year Inflation Expectations", "ミシガン大学5年インフレ期待"),
    ("MBA Mortgage Applications", "MBA住宅ローン申請指数"),
    ("U.S. Baker Hughes Oil Rig Count", "ベーカーヒューズ原油掘削リグ数"),
    ("U.S. Baker Hughes Total Rig Count", "ベーカーヒューズ総リグ数"),
    ("Consumer Credit", "消費者信用"),
    ("Consumer Confidence", "消費者信頼感"),
    ("Consumer Sentiment", "ミシガン大消費者信頼感指数"),
    ("Building Permits", "建設許可件数"),
    ("Housing Starts", "住宅着工戸数"),
    ("Existing Home Sales", "中古住宅販売件数"),
    ("New Home Sales", "新築住宅販売件数"),
    ("Durable Goods Orders (MoM)", "耐久財受注（前月比）"),
    ("Core Durable Goods Orders (MoM)", "コア耐久財受注（前月比）"),
    ("Industrial Production (MoM)", "鉱工業生産（前月比）"),
    ("Capacity Utilization Rate", "設備稼働率"),
    ("Trade Balance", "貿易収支"),
    ("CFTC JPY speculative net positions", "CFTC円投機ネットポジション"),
    ("CFTC GBP speculative net positions", "CFTCポンド投機ネットポジション"),
    // Japan
    ("Foreign Bonds Buying", "外国債購入"),
    ("Foreign Investments in Japanese Stocks", "対内株式投資"),
    ("10-Year JGB Auction", "10年国債入札"),
    ("30-Year JGB Auction", "30年国債入札"),
    ("BoJ Interest Rate Decision", "日銀政策金利"),
    ("BoJ Summary of Opinions", "日銀意見要旨"),
    ("BoJ Governor Ueda Speaks", "植田日銀総裁講演"),
    ("Tokyo CPI (YoY)", "東京CPI（前年比）"),
    ("Household Spending (YoY)", "家計支出（前年比）"),
    ("Household Spending (MoM)", "家計支出（前月比）"),
    ("Foreign Reserves (USD)", "外貨準備"),
    ("Leading Index", "先行指数"),
    ("Coincident Indicator", "一致指数"),
    ("Tertiary Industry Index (MoM)", "第3次産業活動指数（前月比）"),
    ("Machine Orders (MoM)", "機械受注（前月比）"),
    ("Machine Tool Orders (YoY)", "工作機械受注（前年比）"),
    ("Jobs/Applications Ratio", "有効求人倍率"),
    ("Core-Core CPI (YoY)", "コアコアCPI（前年比）"),
    ("Current Account", "経常収支"),
    ("Manufacturing PMI", "製造業PMI"),
    ("Services PMI", "サービス業PMI"),
    // United Kingdom
    ("Construction PMI", "建設業PMI"),
    ("Halifax House Price Index (MoM)", "Halifax住宅価格指数（前月比）"),
    ("Halifax House Price Index (YoY)", "Halifax住宅価格指数（前年比）"),
    ("Nationwide HPI (MoM)", "Nationwide住宅価格指数（前月比）"),
    ("Nationwide HPI (YoY)", "Nationwide住宅価格指数（前年比）"),
    ("RICS House Price Balance", "RICS住宅価格バランス"),
    ("BRC Retail Sales Monitor (YoY)", "BRC小売売上高モニター（前年比）"),
    ("GfK Consumer Confidence", "GfK消費者信頼感"),
    ("Mortgage Approvals", "住宅ローン承認件数"),
    ("Claimant Count Change", "失業保険申請件数の変化"),
    ("Average Earnings Index +Bonus", "平均賃金（ボーナス含む）"),
    ("Average Earnings Index Excluding Bonus", "平均賃金（ボーナス除く）"),
    ("BoE Interest Rate Decision", "BoE政策金利"),
    ("BoE MPC Meeting Minutes", "BoE議事要旨"),
    ("BoE Gov Bailey Speaks", "ベイリーBoE総裁講演"),
    ("ILO Unemployment Rate", "ILO失業率"),
    // Generic
    ("Business Confidence", "企業信頼感"),
    ("Interest Rate Decision", "政策金利"),
    ("Government Budget Value", "政府財政収支"),
    ("Foreign Direct Investment", "海外直接投資"),
];

static DICTIONARY: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TRANSLATIONS.iter().copied().collect());

/// Trailing reference-month marker such as `"  (Dec)"`.
static MONTH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\([A-Za-z]{3}\)$").expect("valid regex"));

/// Japanese name for `name`, or `name` unchanged when unknown.
///
/// The name is looked up with its trailing month marker removed first, then
/// as-is, so `"CPI (YoY)"` still resolves even though `(YoY)` looks like a
/// marker.
pub fn translate_indicator(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return name.to_string();
    }
    let cleaned = MONTH_SUFFIX.replace(trimmed, "");
    DICTIONARY
        .get(&*cleaned)
        .or_else(|| DICTIONARY.get(trimmed))
        .map(|ja| ja.to_string())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_month_marker() {
        assert_eq!(translate_indicator("Household Spending (YoY)  (Dec)"), "家計支出（前年比）");
        assert_eq!(translate_indicator("Non-Farm Payrolls (Jan)"), "非農業部門雇用者数");
    }

    #[test]
    fn exact_name_with_parenthesised_suffix() {
        assert_eq!(translate_indicator("CPI (YoY)"), "CPI（前年比）");
        assert_eq!(translate_indicator("  Unemployment Rate "), "失業率");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(translate_indicator("Atlantis Sponge Output"), "Atlantis Sponge Output");
        assert_eq!(translate_indicator(""), "");
    }

    #[test]
    fn dictionary_keys_are_unique() {
        assert_eq!(DICTIONARY.len(), TRANSLATIONS.len());
    }
}
