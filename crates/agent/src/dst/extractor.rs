//! The ordered pattern cascade.
//!
//! Eleven stages in strict priority: threshold phrases first, then the
//! exemplar fallback, one-turn context disambiguation, the bare-number rule,
//! the sell-side and buy-side rule tables, and residual token scans. Within
//! each table the first structural match wins; there is no scoring.

use regex::Regex;
use swapguard_config::{CurrencyTable, ExemplarSet};

use super::context::ContextDisambiguator;
use super::exemplar::ExemplarMatcher;
use super::normalize::CurrencyNormalizer;
use super::slots::{OrderSlots, SlotKey};
use super::{valid_amount, valid_threshold, ChangeSource, Extraction};

/// Per-turn inputs beyond the utterance itself: the conversation's current
/// slots (for the bare-number and bare-currency rules) and the question
/// asked last turn, if any.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub slots: &'a OrderSlots,
    pub last_question: Option<&'a str>,
}

/// How a sell-side rule's capture groups map onto slots. Shapes that
/// resolve both currencies mark the match as combined, which suppresses
/// the buy-side pass.
#[derive(Debug, Clone, Copy)]
enum SellShape {
    /// group 1 amount, 2 sell, 3 buy
    AmountSellBuy,
    /// group 1 sell, 2 buy
    SellBuy,
    /// group 1 sell, 2 buy, 3 amount
    SellBuyAmount,
    /// group 1 sell (unused fallback), 2 amount, 3 sell
    SellAmountCurrency,
    /// group 1 amount, 2 sell; both or neither
    AmountSell,
    /// group 1 sell
    SellOnly,
}

struct SellRule {
    pattern: Regex,
    shape: SellShape,
    /// Capture group that, when it participates, disqualifies the match.
    /// Stands in for the source grammar's negative lookahead.
    veto: Option<usize>,
}

pub struct PatternCascade {
    threshold_rules: Vec<Regex>,
    sell_rules: Vec<SellRule>,
    amount_rules: Vec<Regex>,
    buy_rules: Vec<Regex>,
    bare_number: Regex,
    bare_currency: Regex,
    residual_token: Regex,
    residual_number: Regex,
    no_amount_indicator: Regex,
    percent: Regex,
    normalizer: CurrencyNormalizer,
    exemplars: ExemplarMatcher,
    context: ContextDisambiguator,
}

impl PatternCascade {
    pub fn new(currencies: CurrencyTable, exemplars: ExemplarSet) -> Self {
        Self {
            threshold_rules: build_threshold_rules(),
            sell_rules: build_sell_rules(),
            amount_rules: build_amount_rules(),
            buy_rules: build_buy_rules(),
            bare_number: Regex::new(r"(?i)^(?:about\s+)?(\d+(?:\.\d+)?)\s*%?$").unwrap(),
            bare_currency: Regex::new(r"^([A-Za-z]{3,})$").unwrap(),
            residual_token: Regex::new(r"\b[A-Za-z]{3,5}\b").unwrap(),
            residual_number: Regex::new(r"\b(\d+(?:\.\d+)?)\b").unwrap(),
            no_amount_indicator: Regex::new(r"(?i)\b(?:them|my\s+holdings?|my\s+\w+\s+holdings?|all\s+my)\b")
                .unwrap(),
            percent: Regex::new(r"(\d+(?:\.\d+)?)%").unwrap(),
            normalizer: CurrencyNormalizer::new(currencies),
            exemplars: ExemplarMatcher::new(exemplars),
            context: ContextDisambiguator::new(),
        }
    }

    pub fn normalizer(&self) -> &CurrencyNormalizer {
        &self.normalizer
    }

    /// Run the full cascade over one utterance.
    pub fn extract(&self, utterance: &str, ctx: ExtractionContext<'_>) -> Extraction {
        let mut extraction = Extraction::default();
        let utterance = utterance.trim();

        // 1. threshold phrases, first valid match wins
        for rule in &self.threshold_rules {
            if let Some(caps) = rule.captures(utterance) {
                let value = &caps[1];
                if valid_threshold(value) {
                    extraction.offer(SlotKey::Threshold, value, ChangeSource::PatternCascade);
                    break;
                }
            }
        }

        // 2. exemplar fallback, only while no currency has surfaced yet
        if extraction.sell.is_none() && extraction.buy.is_none() {
            self.exemplars.pre_seed(utterance, &mut extraction);
        }

        // 3. one-turn context disambiguation, short-circuits the call
        if let Some(question) = ctx.last_question {
            if let Some((key, value)) = self.context.disambiguate(utterance, question, &self.normalizer)
            {
                extraction.offer(key, value, ChangeSource::ContextHint);
                return extraction;
            }
        }

        // 4. a bare number with no usable context goes to whichever numeric
        //    slot the conversation is still missing, threshold first
        if let Some(caps) = self.bare_number.captures(utterance) {
            let value = &caps[1];
            if !ctx.slots.is_set(SlotKey::Threshold) && valid_threshold(value) {
                extraction.offer(SlotKey::Threshold, value, ChangeSource::PatternCascade);
                return extraction;
            }
            if !ctx.slots.is_set(SlotKey::Amount) && valid_amount(value) {
                extraction.offer(SlotKey::Amount, value, ChangeSource::PatternCascade);
                return extraction;
            }
        }

        // 5. sell-side table
        let combined = self.run_sell_rules(utterance, &mut extraction);

        // 6. amount table
        if extraction.amount.is_none() {
            for rule in &self.amount_rules {
                if let Some(caps) = rule.captures(utterance) {
                    let value = &caps[1];
                    if valid_amount(value) {
                        extraction.offer(SlotKey::Amount, value, ChangeSource::PatternCascade);
                    }
                    break;
                }
            }
        }

        // 7. buy-side table, redundant after a combined sell-side match
        if !combined {
            for rule in &self.buy_rules {
                if let Some(caps) = rule.captures(utterance) {
                    if let Some(symbol) = self.normalizer.normalize(&caps[1]) {
                        extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                    }
                    break;
                }
            }
        }

        // 8. a bare currency name fills the conversation's first open
        //    currency slot
        if let Some(caps) = self.bare_currency.captures(utterance) {
            if let Some(symbol) = self.normalizer.normalize(&caps[1]) {
                if !ctx.slots.is_set(SlotKey::Sell) {
                    extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                } else if !ctx.slots.is_set(SlotKey::Buy) {
                    extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                }
            }
        }

        // 9. residual token scan for whichever currency is still missing,
        //    counting slots the conversation already holds as known
        if !combined {
            let mut sell = extraction
                .sell
                .as_ref()
                .map(|f| f.value.clone())
                .filter(|v| !v.is_empty())
                .or_else(|| non_empty(ctx.slots.get(SlotKey::Sell)));
            let buy_known =
                extraction.buy.is_some() || ctx.slots.is_set(SlotKey::Buy);
            if sell.is_none() || !buy_known {
                for token in self.residual_token.find_iter(utterance) {
                    let Some(symbol) = self.normalizer.normalize(token.as_str()) else {
                        continue;
                    };
                    match &sell {
                        None => {
                            extraction.offer(SlotKey::Sell, symbol.clone(), ChangeSource::PatternCascade);
                            sell = Some(symbol);
                        }
                        Some(current) if !buy_known && *current != symbol => {
                            extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                            break;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        // 10. residual standalone number, unless the utterance says the
        //     amount is deliberately unspecified
        if extraction.amount.is_none() && !self.no_amount_indicator.is_match(utterance) {
            let threshold = extraction.threshold.as_ref().map(|f| f.value.as_str());
            for caps in self.residual_number.captures_iter(utterance) {
                let Some(m) = caps.get(1) else { continue };
                if utterance[m.end()..].starts_with('%') {
                    continue;
                }
                if threshold == Some(m.as_str()) {
                    continue;
                }
                if valid_amount(m.as_str()) {
                    extraction.offer(SlotKey::Amount, m.as_str(), ChangeSource::PatternCascade);
                }
                break;
            }
        }

        // 11. residual percentage
        if extraction.threshold.is_none() {
            if let Some(caps) = self.percent.captures(utterance) {
                let value = &caps[1];
                if valid_threshold(value) {
                    extraction.offer(SlotKey::Threshold, value, ChangeSource::PatternCascade);
                }
            }
        }

        extraction
    }

    /// Returns true on a combined match (both currencies resolved by one
    /// rule), which makes the buy-side pass redundant.
    fn run_sell_rules(&self, utterance: &str, extraction: &mut Extraction) -> bool {
        for rule in &self.sell_rules {
            let Some(caps) = rule.pattern.captures(utterance) else {
                continue;
            };
            if let Some(veto) = rule.veto {
                if caps.get(veto).is_some() {
                    continue;
                }
            }
            tracing::debug!(pattern = rule.pattern.as_str(), shape = ?rule.shape, "sell rule matched");

            match rule.shape {
                SellShape::AmountSellBuy => {
                    if valid_amount(&caps[1]) {
                        extraction.offer(SlotKey::Amount, &caps[1], ChangeSource::PatternCascade);
                    }
                    if let Some(symbol) = self.normalizer.normalize(&caps[2]) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                    }
                    if let Some(symbol) = self.normalizer.normalize(&caps[3]) {
                        extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                    }
                    return true;
                }
                SellShape::SellBuy => {
                    if let Some(symbol) = self.normalizer.normalize(&caps[1]) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                    }
                    if let Some(symbol) = self.normalizer.normalize(&caps[2]) {
                        extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                    }
                    return true;
                }
                SellShape::SellBuyAmount => {
                    if let Some(symbol) = self.normalizer.normalize(&caps[1]) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                    }
                    if let Some(symbol) = self.normalizer.normalize(&caps[2]) {
                        extraction.offer(SlotKey::Buy, symbol, ChangeSource::PatternCascade);
                    }
                    if valid_amount(&caps[3]) {
                        extraction.offer(SlotKey::Amount, &caps[3], ChangeSource::PatternCascade);
                    }
                    return true;
                }
                SellShape::SellAmountCurrency => {
                    if let Some(symbol) = self.normalizer.normalize(&caps[3]) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                        if valid_amount(&caps[2]) {
                            extraction.offer(SlotKey::Amount, &caps[2], ChangeSource::PatternCascade);
                        }
                    }
                    return false;
                }
                SellShape::AmountSell => {
                    if let Some(symbol) = self.normalizer.normalize(&caps[2]) {
                        if valid_amount(&caps[1]) {
                            extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                            extraction.offer(SlotKey::Amount, &caps[1], ChangeSource::PatternCascade);
                        }
                    }
                    return false;
                }
                SellShape::SellOnly => {
                    if let Some(symbol) = self.normalizer.normalize(&caps[1]) {
                        extraction.offer(SlotKey::Sell, symbol, ChangeSource::PatternCascade);
                    }
                    return false;
                }
            }
        }
        false
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn build_threshold_rules() -> Vec<Regex> {
    [
        r"(?i)(?:about\s+)?(?:a\s+)?(\d+(?:\.\d+)?)%?\s*threshold",
        r"(?i)threshold.*?(?:about\s+)?(?:a\s+)?(\d+(?:\.\d+)?)%?",
        r"(?i)at\s+(?:about\s+)?(\d+(?:\.\d+)?)%\s*loss",
        r"(?i)(\d+(?:\.\d+)?)%\s*loss",
        r"(?i)loss\s+(?:of\s+)?(\d+(?:\.\d+)?)%",
        r"(?i)for\s+(?:about\s+)?(?:a\s+)?(\d+(?:\.\d+)?)%",
        r"(?i)at\s+(?:about\s+)?(\d+(?:\.\d+)?)%",
        r"(?i)(?:about\s+)?(?:a\s+)?(\d+(?:\.\d+)?)%",
        r"(?i)stop\s+loss\s+(?:of|at)\s+(\d+(?:\.\d+)?)%?",
        r"(?i)at\s+a\s+stop\s+loss\s+of\s+(\d+(?:\.\d+)?)%?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

fn build_sell_rules() -> Vec<SellRule> {
    let rule = |pattern: &str, shape: SellShape, veto: Option<usize>| SellRule {
        pattern: Regex::new(pattern).unwrap(),
        shape,
        veto,
    };
    vec![
        rule(
            r"(?i)(?:make\s+)?stop\s+order\s+sell\s+(\d+(?:\.\d+)?)\s+([A-Za-z]{3,})\s+get\s+([A-Za-z]{3,})",
            SellShape::AmountSellBuy,
            None,
        ),
        rule(
            r"(?i)sell\s+(\d+(?:\.\d+)?)\s+([A-Za-z]{3,})\s+get\s+([A-Za-z]{3,})",
            SellShape::AmountSellBuy,
            None,
        ),
        rule(
            r"(?i)auto\s+sell\s+my\s+([A-Za-z]{3,})\s+for\s+([A-Za-z]{3,})\s+at\s+\d+(?:\.\d+)?%\s+loss",
            SellShape::SellBuy,
            None,
        ),
        rule(
            r"(?i)swap\s+(\d+(?:\.\d+)?)\s*([A-Za-z]{3,})\s+for\s+([A-Za-z]{3,})",
            SellShape::AmountSellBuy,
            None,
        ),
        rule(
            r"(?i)protect\s+my\s+([A-Za-z]{3,})\s+for\s+([A-Za-z]{3,})\s+.*?sell\s+(\d+(?:\.\d+)?)(\s*%)?",
            SellShape::SellBuyAmount,
            Some(4),
        ),
        rule(
            r"(?i)stop\s+order\s+for\s+([A-Za-z]{3,})\s+buy\s+me\s+([A-Za-z]{3,})\s+instead",
            SellShape::SellBuy,
            None,
        ),
        rule(
            r"(?i)protects?\s+my\s+([A-Za-z]{3,})\s+for\s+([A-Za-z]{3,})",
            SellShape::SellBuy,
            None,
        ),
        rule(
            r"(?i)protect\s+my\s+([A-Za-z]{3,})\s+and\s+sell\s+them\s+for\s+receiving\s+([A-Za-z]{3,})",
            SellShape::SellBuy,
            None,
        ),
        rule(
            r"(?i)(?:sell|selling|want\s+to\s+sell|wanna\s+sell)\s+(\d+(?:\.\d+)?)\s*([A-Za-z]{3,})",
            SellShape::AmountSell,
            None,
        ),
        rule(
            r"(?i)protect\s+my\s+([A-Za-z]{3,})\s+for\s+[A-Za-z]{3,}.*?sell\s+(\d+(?:\.\d+)?)\s*([A-Za-z]{3,})",
            SellShape::SellAmountCurrency,
            None,
        ),
        rule(
            r"(?i)protect\s+my\s+(\d+(?:\.\d+)?)\s*([A-Za-z]{3,})",
            SellShape::AmountSell,
            None,
        ),
        rule(
            r"(?i)(\d+(?:\.\d+)?)\s*([A-Za-z]{3,})(?:\s+to\s+buy|\s+into)",
            SellShape::AmountSell,
            None,
        ),
        rule(
            r"(?i)(?:selling|from|exchange|convert)\s+([A-Za-z]{3,})",
            SellShape::SellOnly,
            None,
        ),
        rule(r"(?i)sell\s+([A-Za-z]{3,})", SellShape::SellOnly, None),
        rule(
            r"(?i)protect\s+my\s+([A-Za-z]{3,})(\s*\d)?",
            SellShape::SellOnly,
            Some(2),
        ),
        rule(
            r"(?i)stop\s+loss\s+(?:for|on|of)\s+([A-Za-z]{3,})",
            SellShape::SellOnly,
            None,
        ),
        rule(
            r"(?i)stop\s+loss\s+my\s+([A-Za-z]{3,})",
            SellShape::SellOnly,
            None,
        ),
        rule(r"(?i)for\s+([A-Za-z]{3,})", SellShape::SellOnly, None),
    ]
}

fn build_amount_rules() -> Vec<Regex> {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*(?:coins?|units?|tokens?)",
        r"(?i)amount\s*(?:of|:)?\s*(\d+(?:\.\d+)?)",
        r"(?i)quantity\s*(?:of|:)?\s*(\d+(?:\.\d+)?)",
        r"^(\d+(?:\.\d+)?)$",
        r"(?i)(\d+(?:\.\d+)?)\s+(?:of\s+)?[A-Za-z]{3,}",
        r"(?i)(\d+(?:\.\d+)?)\s*[A-Za-z]{3,}",
        r"(?i)sell\s+(\d+(?:\.\d+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

fn build_buy_rules() -> Vec<Regex> {
    [
        r"(?i)buy\s+me\s+([A-Za-z]{3,})\s+instead",
        r"(?i)protect\s+my\s+[A-Za-z]{3,}\s+for\s+([A-Za-z]{3,})",
        r"(?i)(?:and\s+)?(?:would\s+)?want\s+to\s+receive\s+([A-Za-z]{3,})\s+in\s+its\s+place",
        r"(?i)receive\s+([A-Za-z]{3,})\s+in\s+its\s+place",
        r"(?i)(?:and\s+)?(?:would\s+)?want\s+to\s+receive\s+([A-Za-z]{3,})",
        r"(?i)receive\s+([A-Za-z]{3,})",
        r"(?i)buy\s+([A-Za-z]{3,})",
        r"(?i)buying\s+([A-Za-z]{3,})",
        r"(?i)to\s+([A-Za-z]{3,})",
        r"(?i)for\s+([A-Za-z]{3,})",
        r"(?i)into\s+([A-Za-z]{3,})",
        r"(?i)get\s+([A-Za-z]{3,})",
        r"(?i)([A-Za-z]{3,})\s+in\s+its\s+place",
        r"(?i)in\s+its\s+place.*?([A-Za-z]{3,})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapguard_config::{CurrencyTable, ExemplarSet};

    fn cascade() -> PatternCascade {
        PatternCascade::new(CurrencyTable::default(), ExemplarSet::default())
    }

    fn value(extraction: &Extraction, key: SlotKey) -> Option<&str> {
        extraction.get(key).map(|f| f.value.as_str())
    }

    fn empty_ctx(slots: &OrderSlots) -> ExtractionContext<'_> {
        ExtractionContext {
            slots,
            last_question: None,
        }
    }

    #[test]
    fn test_sell_get_phrase_fills_all_four_slots() {
        let slots = OrderSlots::default();
        let e = cascade().extract("stop order sell 15 TokenA get TokenB at 15% loss", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Sell), Some("TOKENA"));
        assert_eq!(value(&e, SlotKey::Buy), Some("TOKENB"));
        assert_eq!(value(&e, SlotKey::Amount), Some("15"));
        assert_eq!(value(&e, SlotKey::Threshold), Some("15"));
    }

    #[test]
    fn test_swap_phrase_is_a_combined_match() {
        let slots = OrderSlots::default();
        let e = cascade().extract("swap 1000 ada for usdc", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Sell), Some("ADA"));
        assert_eq!(value(&e, SlotKey::Buy), Some("USDC"));
        assert_eq!(value(&e, SlotKey::Amount), Some("1000"));
    }

    #[test]
    fn test_auto_sell_phrase_resolves_both_currencies() {
        let slots = OrderSlots::default();
        let e = cascade().extract("auto sell my ICP for USDC at 17% loss", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Sell), Some("ICP"));
        assert_eq!(value(&e, SlotKey::Buy), Some("USDC"));
        assert_eq!(value(&e, SlotKey::Threshold), Some("17"));
    }

    #[test]
    fn test_protect_holdings_sets_sell_only() {
        let slots = OrderSlots::default();
        let e = cascade().extract("protect my ETH holdings", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Sell), Some("ETH"));
        assert_eq!(value(&e, SlotKey::Buy), None);
        // "my ETH holdings" signals an unspecified amount
        assert_eq!(value(&e, SlotKey::Amount), None);
    }

    #[test]
    fn test_protect_for_phrase_resolves_pair() {
        let slots = OrderSlots::default();
        let e = cascade().extract(
            "lets create a stop order which protects my Xai for Aave when loss % drops to 12%",
            empty_ctx(&slots),
        );
        assert_eq!(value(&e, SlotKey::Sell), Some("XAI"));
        assert_eq!(value(&e, SlotKey::Buy), Some("AAVE"));
        assert_eq!(value(&e, SlotKey::Threshold), Some("12"));
    }

    #[test]
    fn test_buy_me_instead_phrase() {
        let slots = OrderSlots::default();
        let e = cascade().extract("stop order for xavi buy me Pepe instead", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Sell), Some("XAVI"));
        assert_eq!(value(&e, SlotKey::Buy), Some("PEPE"));
    }

    #[test]
    fn test_bare_number_prefers_missing_threshold() {
        let slots = OrderSlots::default();
        let e = cascade().extract("25", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Threshold), Some("25"));
        assert_eq!(value(&e, SlotKey::Amount), None);
    }

    #[test]
    fn test_bare_number_falls_to_amount_when_threshold_known() {
        let mut slots = OrderSlots::default();
        slots.set(SlotKey::Threshold, "10".to_string());
        let e = cascade().extract("about 250", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Amount), Some("250"));
        assert_eq!(value(&e, SlotKey::Threshold), None);
    }

    #[test]
    fn test_context_question_routes_bare_currency() {
        let slots = OrderSlots::default();
        let ctx = ExtractionContext {
            slots: &slots,
            last_question: Some("What currency do you want to buy with your ETH?"),
        };
        let e = cascade().extract("USDT", ctx);
        assert_eq!(value(&e, SlotKey::Buy), Some("USDT"));
        assert_eq!(value(&e, SlotKey::Sell), None);
    }

    #[test]
    fn test_residual_scan_picks_up_tickers() {
        // no structural sell/buy phrasing, only ticker mentions; every other
        // word is outside the 3-5 letter window the scan considers
        let slots = OrderSlots::default();
        let e = cascade().extract(
            "considering unloading WBTC toward WETH eventually",
            empty_ctx(&slots),
        );
        assert_eq!(value(&e, SlotKey::Sell), Some("WBTC"));
        assert_eq!(value(&e, SlotKey::Buy), Some("WETH"));
    }

    #[test]
    fn test_residual_scan_respects_known_conversation_currencies() {
        let mut slots = OrderSlots::default();
        slots.set(SlotKey::Sell, "BTC".to_string());
        let e = cascade().extract("usdc", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Buy), Some("USDC"));
        assert_eq!(value(&e, SlotKey::Sell), None);
    }

    #[test]
    fn test_percentage_numbers_are_not_amounts() {
        let slots = OrderSlots::default();
        let e = cascade().extract("sell my eurs to at 40% loss", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Threshold), Some("40"));
        assert_eq!(value(&e, SlotKey::Amount), None);
    }

    #[test]
    fn test_out_of_range_threshold_is_discarded() {
        let slots = OrderSlots::default();
        let e = cascade().extract("stop loss of 250%", empty_ctx(&slots));
        assert_eq!(value(&e, SlotKey::Threshold), None);
    }

    #[test]
    fn test_unit_amount_phrase() {
        let slots = OrderSlots::default();
        let e = cascade().extract(
            "set up a stop loss for my ETH, sell 100 tokens for USDC when it drops 25%",
            empty_ctx(&slots),
        );
        assert_eq!(value(&e, SlotKey::Sell), Some("ETH"));
        assert_eq!(value(&e, SlotKey::Amount), Some("100"));
        assert_eq!(value(&e, SlotKey::Threshold), Some("25"));
    }
}
