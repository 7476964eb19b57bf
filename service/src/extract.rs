//! Heuristic extraction of case fields from contract document text.
//!
//! Input is plain text already pulled out of an uploaded contract document.
//! Extraction is best effort: every field of the resulting [`Draft`] is
//! optional, and a section the heuristics cannot find simply stays [`None`].

use std::{str::FromStr as _, sync::LazyLock};

use common::{Date, Money};
use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::{case, milestone::Stage};

/// Best-effort partial case record extracted from contract text.
///
/// Stage amounts are quoted in 萬 (ten thousands of New Taiwan dollars) in
/// contract documents and are converted to plain [`Money`] here.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// Case number found next to a 案號/案件編號 label.
    pub number: Option<case::Number>,

    /// Buying party.
    pub buyer: PartyDraft,

    /// Selling party.
    pub seller: PartyDraft,

    /// Total transaction price (總價).
    pub total_price: Option<Money>,

    /// Contract signing stage (簽約).
    pub contract: Stage,

    /// Sealing stage (用印).
    pub seal: Stage,

    /// Tax payment stage (完稅).
    pub tax_payment: Stage,

    /// Balance payment stage (尾款).
    pub balance: Stage,
}

impl Draft {
    /// Indicates whether nothing was extracted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.buyer.is_empty()
            && self.seller.is_empty()
            && self.total_price.is_none()
            && self.contract.is_empty()
            && self.seal.is_empty()
            && self.tax_payment.is_empty()
            && self.balance.is_empty()
    }
}

/// Party fields extracted from one side of the 賣方 split.
#[derive(Clone, Debug, Default)]
pub struct PartyDraft {
    /// Name of the party.
    pub name: Option<case::PartyName>,

    /// Phone of the party.
    pub phone: Option<case::Phone>,
}

impl PartyDraft {
    /// Indicates whether nothing was extracted for this party.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

/// Extracts a [`Draft`] from the provided contract document text.
///
/// Never fails: unrecognized or malformed sections leave the corresponding
/// fields unset.
#[must_use]
pub fn parse(text: &str) -> Draft {
    let text = normalize_whitespace(text);

    let mut draft = Draft {
        number: parse_number(&text),
        total_price: parse_total_price(&text),
        ..Draft::default()
    };

    // Buyer fields live before the 賣方 marker, seller fields after it.
    // Without the marker the whole text is treated as the buyer's side.
    let (buyer_half, seller_half) = match text.find("賣方") {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text.as_str(), ""),
    };
    draft.buyer = parse_party(buyer_half, &BUYER_NAME);
    draft.seller = parse_party(seller_half, &SELLER_NAME);

    for caps in STAGE.captures_iter(&text) {
        let stage = match &caps[1] {
            "簽約" => &mut draft.contract,
            "用印" => &mut draft.seal,
            "完稅" => &mut draft.tax_payment,
            "尾款" => &mut draft.balance,
            _ => continue,
        };
        if !stage.is_empty() {
            // First occurrence wins.
            continue;
        }

        stage.amount = Decimal::from_str(&caps[2])
            .ok()
            .and_then(Money::from_wan);
        stage.method = caps
            .get(3)
            .and_then(|m| milestone_method(m.as_str()));
        stage.date = normalize_date(&caps[4]);
    }

    draft
}

/// Normalizes a loosely formatted date (`/`, `.` or `-` separated, possibly
/// a 2-3 digit 民國 year) into a [`Date`].
///
/// `2024/3/5` and `113.3.5` both normalize to `2024-03-05`.
#[must_use]
pub fn normalize_date(raw: &str) -> Option<Date> {
    let mut parts = raw.trim().split(['/', '.', '-']);
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u8>().ok()?;
    let day = parts.next()?.trim().parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    // 2-3 digit years are 民國 (Republic of China) years.
    let year = if year < 1000 { year + 1911 } else { year };

    Date::from_iso(&format!("{year:04}-{month:02}-{day:02}")).ok()
}

/// Collapses all whitespace runs into single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the case number.
fn parse_number(text: &str) -> Option<case::Number> {
    static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?:案件編號|案號)\s*[:：]?\s*([A-Za-z0-9][A-Za-z0-9\-]{0,30})",
        )
        .expect("valid regex")
    });

    case::Number::new(NUMBER.captures(text)?.get(1)?.as_str())
}

/// Extracts the total price, quoted in 萬.
fn parse_total_price(text: &str) -> Option<Money> {
    static TOTAL: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"總價\s*[:：]?\s*(\d+(?:\.\d+)?)\s*萬").expect("valid regex")
    });

    Money::from_wan(
        Decimal::from_str(TOTAL.captures(text)?.get(1)?.as_str()).ok()?,
    )
}

/// Extracts the name and phone of one party from its half of the text.
fn parse_party(half: &str, name_regex: &Regex) -> PartyDraft {
    PartyDraft {
        name: name_regex
            .captures(half)
            .and_then(|caps| case::PartyName::new(&caps[1])),
        phone: PHONE
            .captures(half)
            .and_then(|caps| case::Phone::new(&caps[1])),
    }
}

/// Buyer name next to a 買方 label.
static BUYER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"買方(?:姓名)?\s*[:：]?\s*([\p{Han}A-Za-z·]{1,30})")
        .expect("valid regex")
});

/// Seller name next to a 賣方 label.
static SELLER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"賣方(?:姓名)?\s*[:：]?\s*([\p{Han}A-Za-z·]{1,30})")
        .expect("valid regex")
});

/// Taiwanese mobile or landline phone number.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(09\d{8}|0\d{1,2}-\d{6,8}(?:#\d{1,5})?)")
        .expect("valid regex")
});

/// Payment stage: a label, amount digits (in 萬), an optional non-bracket
/// method token and a bracketed date.
static STAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(簽約|用印|完稅|尾款)[款金]?\s*[:：]?\s*(\d+(?:\.\d+)?)\s*萬?\s*([^()（）\d\s]{1,8})?\s*[（(]\s*([\d./\-]{5,10})\s*[）)]",
    )
    .expect("valid regex")
});

/// Validates an extracted method token.
fn milestone_method(token: &str) -> Option<crate::domain::milestone::Method> {
    crate::domain::milestone::Method::new(token)
}

#[cfg(test)]
mod spec {
    use super::{normalize_date, parse};

    #[test]
    fn normalizes_loose_dates() {
        assert_eq!(normalize_date("2024/3/5").unwrap().to_iso(), "2024-03-05");
        assert_eq!(normalize_date("2024.3.5").unwrap().to_iso(), "2024-03-05");
        assert_eq!(normalize_date("2024-3-5").unwrap().to_iso(), "2024-03-05");
        assert_eq!(
            normalize_date("2024/01/15").unwrap().to_iso(),
            "2024-01-15",
        );

        // 民國 years.
        assert_eq!(normalize_date("113/3/5").unwrap().to_iso(), "2024-03-05");

        assert!(normalize_date("2024/13/5").is_none());
        assert!(normalize_date("2024/3").is_none());
        assert!(normalize_date("2024/3/5/7").is_none());
        assert!(normalize_date("soon").is_none());
    }

    #[test]
    fn extracts_stage_with_method() {
        let draft = parse("用印100轉帳(2024/01/15)");

        let seal = &draft.seal;
        assert_eq!(seal.amount.unwrap().to_wan(), 100.into());
        assert_eq!(
            AsRef::<str>::as_ref(seal.method.as_ref().unwrap()),
            "轉帳",
        );
        assert_eq!(seal.date.unwrap().to_iso(), "2024-01-15");
    }

    #[test]
    fn extracts_stage_without_method() {
        let draft = parse("完稅 200 (2024/2/1)");

        let stage = &draft.tax_payment;
        assert_eq!(stage.amount.unwrap().to_wan(), 200.into());
        assert!(stage.method.is_none());
        assert_eq!(stage.date.unwrap().to_iso(), "2024-02-01");
    }

    #[test]
    fn absent_sections_stay_unset() {
        let draft = parse("這份文件沒有任何可以辨識的欄位");

        assert!(draft.is_empty());
    }

    #[test]
    fn splits_parties_at_seller_marker() {
        let draft = parse(
            "買方：王小明 電話 0912345678 賣方：李大華 電話 02-23456789",
        );

        assert_eq!(
            AsRef::<str>::as_ref(&draft.buyer.name.unwrap()),
            "王小明",
        );
        assert_eq!(
            AsRef::<str>::as_ref(&draft.buyer.phone.unwrap()),
            "0912345678",
        );
        assert_eq!(
            AsRef::<str>::as_ref(&draft.seller.name.unwrap()),
            "李大華",
        );
        assert_eq!(
            AsRef::<str>::as_ref(&draft.seller.phone.unwrap()),
            "02-23456789",
        );
    }

    #[test]
    fn extracts_full_document() {
        let text = "
            案號：114-0042
            買方 王小明 0912345678
            賣方 李大華 02-23456789
            總價 1250 萬
            簽約 125 現金 (2024/1/5)
            用印 100 轉帳 (2024/01/15)
            完稅 200 (2024.2.1)
            尾款 825 貸款 (113-2-20)
        ";
        let draft = parse(text);

        assert_eq!(
            AsRef::<str>::as_ref(&draft.number.unwrap()),
            "114-0042",
        );
        assert_eq!(draft.total_price.unwrap().to_wan(), 1250.into());
        assert_eq!(draft.contract.date.unwrap().to_iso(), "2024-01-05");
        assert_eq!(draft.seal.date.unwrap().to_iso(), "2024-01-15");
        assert_eq!(draft.tax_payment.date.unwrap().to_iso(), "2024-02-01");
        assert_eq!(draft.balance.date.unwrap().to_iso(), "2024-02-20");
        assert_eq!(
            AsRef::<str>::as_ref(draft.balance.method.as_ref().unwrap()),
            "貸款",
        );
    }

    #[test]
    fn first_stage_occurrence_wins() {
        let draft = parse("用印100轉帳(2024/01/15) 用印999現金(2025/01/15)");

        assert_eq!(draft.seal.amount.unwrap().to_wan(), 100.into());
        assert_eq!(draft.seal.date.unwrap().to_iso(), "2024-01-15");
    }
}
