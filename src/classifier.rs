//! Rule-based category inference.
//!
//! Two ordered stages, first match wins:
//! 1. the institution's own tag (source hint), when one is present;
//! 2. keywords found in the description.
//!
//! Rules are plain data passed in by the caller, so the same rule set can be
//! shared read-only across statements.

use crate::types::{Category, TransactionType};

/// Stage 1 rule: a token looked up in the source hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRule {
    pub token: String,
    pub category: Category,
    /// Also matches any income-typed transaction carrying a hint.
    pub matches_income: bool,
}

/// Stage 2 rule: any of the keywords found in the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    hint_rules: Vec<HintRule>,
    keyword_rules: Vec<KeywordRule>,
}

fn hint(token: &str, category: Category) -> HintRule {
    HintRule {
        token: token.to_string(),
        category,
        matches_income: false,
    }
}

fn keywords(category: Category, words: &[&str]) -> KeywordRule {
    KeywordRule {
        category,
        keywords: words.iter().map(|w| w.to_string()).collect(),
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        let hint_rules = vec![
            hint("shopping", Category::Shopping),
            hint("food", Category::Food),
            hint("groceries", Category::Groceries),
            hint("transfers", Category::Transfers),
            HintRule {
                matches_income: true,
                ..hint("income", Category::Income)
            },
            hint("bill payment", Category::Bills),
            hint("travel", Category::Transport),
            hint("cashback", Category::Income),
            hint("recharge", Category::Utilities),
        ];

        let keyword_rules = vec![
            keywords(
                Category::Food,
                &["swiggy", "zomato", "restaurant", "cafe", "dominos", "pizza", "fast food", "soul tree"],
            ),
            keywords(Category::Transport, &["uber", "ola", "metro", "fuel", "petrol"]),
            keywords(
                Category::Utilities,
                &["electricity", "water bill", "internet", "broadband", "telecom"],
            ),
            keywords(Category::Salary, &["salary", "payout", "employer", "income"]),
            keywords(Category::Shopping, &["amazon", "flipkart", "myntra", "shopping"]),
            keywords(Category::Rent, &["rent", "house", "landlord"]),
            keywords(Category::Transfers, &["transfer", "money sent", "money received"]),
            keywords(Category::Groceries, &["groceries", "supermarket", "kirana"]),
            keywords(Category::Bills, &["bill", "emi", "payment"]),
        ];

        Self::new(hint_rules, keyword_rules)
    }
}

impl CategoryRules {
    /// Tokens and keywords are lowercased here so matching only lowercases the
    /// input side.
    pub fn new(hint_rules: Vec<HintRule>, keyword_rules: Vec<KeywordRule>) -> Self {
        let hint_rules = hint_rules
            .into_iter()
            .map(|rule| HintRule {
                token: rule.token.to_lowercase(),
                ..rule
            })
            .collect();
        let keyword_rules = keyword_rules
            .into_iter()
            .map(|rule| KeywordRule {
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                ..rule
            })
            .collect();

        Self {
            hint_rules,
            keyword_rules,
        }
    }

    pub fn hint_rules(&self) -> &[HintRule] {
        &self.hint_rules
    }

    pub fn keyword_rules(&self) -> &[KeywordRule] {
        &self.keyword_rules
    }

    /// Assigns a category. Total: falls back to [`Category::Uncategorized`].
    pub fn classify(
        &self,
        source_hint: Option<&str>,
        description: &str,
        transaction_type: TransactionType,
    ) -> Category {
        source_hint
            .and_then(|hint| self.match_hint(hint, transaction_type))
            .or_else(|| self.match_keywords(description))
            .unwrap_or(Category::Uncategorized)
    }

    fn match_hint(&self, hint: &str, transaction_type: TransactionType) -> Option<Category> {
        let hint = hint.to_lowercase();
        self.hint_rules
            .iter()
            .find(|rule| {
                hint.contains(&rule.token)
                    || (rule.matches_income && transaction_type == TransactionType::Income)
            })
            .map(|rule| rule.category)
    }

    fn match_keywords(&self, description: &str) -> Option<Category> {
        let description = description.to_lowercase();
        self.keyword_rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| description.contains(k.as_str())))
            .map(|rule| rule.category)
    }
}

/// Free-function form of [`CategoryRules::classify`].
pub fn classify(
    rules: &CategoryRules,
    source_hint: Option<&str>,
    description: &str,
    transaction_type: TransactionType,
) -> Category {
    rules.classify(source_hint, description, transaction_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use crate::types::TransactionType::{Expense, Income};

    #[rstest]
    #[case("Shopping & Food", Expense, Category::Shopping)]
    #[case("🍔 Food", Expense, Category::Food)]
    #[case("Groceries", Expense, Category::Groceries)]
    #[case("Transfers", Expense, Category::Transfers)]
    #[case("Income", Expense, Category::Income)]
    #[case("Wallet", Income, Category::Income)]
    #[case("Bill Payment", Expense, Category::Bills)]
    #[case("Travel", Expense, Category::Transport)]
    #[case("Cashback Received", Expense, Category::Income)]
    #[case("Mobile Recharge", Expense, Category::Utilities)]
    #[case("Transfers", Income, Category::Transfers)]
    #[case("Food", Income, Category::Food)]
    fn test_hint_priority(
        #[case] hint: &str,
        #[case] transaction_type: TransactionType,
        #[case] expected: Category,
    ) {
        let rules = CategoryRules::default();
        assert_eq!(rules.classify(Some(hint), "", transaction_type), expected);
    }

    #[rstest]
    #[case("Zomato order #123", Category::Food)]
    #[case("UBER TRIP BLR", Category::Transport)]
    #[case("Electricity board", Category::Utilities)]
    #[case("Monthly SALARY credit", Category::Salary)]
    #[case("Amazon Pay", Category::Shopping)]
    #[case("Paid to landlord", Category::Rent)]
    #[case("Money sent to Ravi", Category::Transfers)]
    #[case("Kirana store", Category::Groceries)]
    #[case("Credit card EMI", Category::Bills)]
    #[case("xyz123", Category::Uncategorized)]
    #[case("", Category::Uncategorized)]
    fn test_keyword_fallback(#[case] description: &str, #[case] expected: Category) {
        let rules = CategoryRules::default();
        assert_eq!(rules.classify(None, description, Expense), expected);
    }

    #[test]
    fn test_keyword_table_order_is_significant() {
        let rules = CategoryRules::default();
        // "fuel" (Transport) is declared before "payment" (Bills)
        assert_eq!(
            rules.classify(None, "Fuel payment", Expense),
            Category::Transport
        );
        // "ola" is inside "cola"; Transport is checked before Shopping
        assert_eq!(
            rules.classify(None, "Coca cola shopping", Expense),
            Category::Transport
        );
        // "rent" appears inside "current"
        assert_eq!(
            rules.classify(None, "Current account bill", Expense),
            Category::Rent
        );
    }

    #[test]
    fn test_unmatched_hint_falls_through_to_keywords() {
        let rules = CategoryRules::default();
        assert_eq!(
            rules.classify(Some("Services"), "Swiggy instamart", Expense),
            Category::Food
        );
        assert_eq!(
            rules.classify(Some("Services"), "xyz123", Expense),
            Category::Uncategorized
        );
    }

    #[test]
    fn test_income_type_only_matters_with_hint() {
        let rules = CategoryRules::default();
        assert_eq!(
            rules.classify(None, "Refund xyz", Income),
            Category::Uncategorized
        );
        assert_eq!(
            rules.classify(Some("Misc"), "Refund xyz", Income),
            Category::Income
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let rules = CategoryRules::default();
        let first = classify(&rules, Some("Travel"), "Uber", Expense);
        let second = classify(&rules, Some("Travel"), "Uber", Expense);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_rules_are_lowercased() {
        let rules = CategoryRules::new(
            vec![hint("FUEL", Category::Transport)],
            vec![keywords(Category::Rent, &["NoBroker"])],
        );
        assert_eq!(rules.hint_rules()[0].token, "fuel");
        assert_eq!(rules.keyword_rules()[0].keywords, vec!["nobroker".to_string()]);
        assert_eq!(
            rules.classify(None, "NOBROKER deposit", Expense),
            Category::Rent
        );
    }

    #[test]
    fn test_default_tables_preserve_declaration_order() {
        let rules = CategoryRules::default();
        let hint_order: Vec<_> = rules.hint_rules().iter().map(|r| r.token.as_str()).collect();
        assert_eq!(
            hint_order,
            vec![
                "shopping", "food", "groceries", "transfers", "income", "bill payment", "travel",
                "cashback", "recharge"
            ]
        );

        let keyword_order: Vec<_> = rules.keyword_rules().iter().map(|r| r.category).collect();
        assert_eq!(
            keyword_order,
            vec![
                Category::Food,
                Category::Transport,
                Category::Utilities,
                Category::Salary,
                Category::Shopping,
                Category::Rent,
                Category::Transfers,
                Category::Groceries,
                Category::Bills,
            ]
        );
    }
}
