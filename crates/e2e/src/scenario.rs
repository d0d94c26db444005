//! Purchase scenarios
//!
//! The built-in catalog covers both purchase kinds with the same form cases.
//! Extra scenarios can be described in YAML files:
//!
//! ```yaml
//! id: debit-far-expiry
//! name: Debit card payment expiring in five years
//! kind: debit
//! tags: [debit, validation]
//! card: APPROVED
//! month: { input: month_plus, months: 0 }
//! year: { input: year_plus, years: 5 }
//! owner: { input: holder }
//! cvc: { input: cvc, digits: 3 }
//! expect: approved
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use travelpay_common::{CardStatus, DataHelper, PurchaseKind, SuiteConfig};

use crate::error::{E2eError, E2eResult};
use crate::page::{Field, TravelPurchasePage};

pub const MSG_REQUIRED: &str = "Поле обязательно для заполнения";
pub const MSG_WRONG_FORMAT: &str = "Неверный формат";
pub const MSG_WRONG_EXPIRY: &str = "Неверно указан срок действия карты";
pub const MSG_EXPIRED: &str = "Истёк срок действия карты";

/// How a form field is filled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum Input {
    /// Leave the field untouched
    #[default]
    Empty,
    MonthPlus { months: i32 },
    YearPlus { years: i32 },
    Zero,
    MonthOver,
    MonthOneDigit,
    Holder,
    HolderCyrillic,
    HolderNumeric,
    HolderOneSymbol,
    HolderSpecChar { count: usize },
    Cvc { digits: usize },
    Literal { value: String },
}

impl Input {
    /// Produce the value to type, `None` for an untouched field
    pub fn resolve(&self) -> Option<String> {
        match self {
            Input::Empty => None,
            Input::MonthPlus { months } => Some(DataHelper::month_plus(*months)),
            Input::YearPlus { years } => Some(DataHelper::year_plus(*years)),
            Input::Zero => Some(DataHelper::zero()),
            Input::MonthOver => Some(DataHelper::month_over()),
            Input::MonthOneDigit => Some(DataHelper::month_one_digit()),
            Input::Holder => Some(DataHelper::holder()),
            Input::HolderCyrillic => Some(DataHelper::holder_cyrillic()),
            Input::HolderNumeric => Some(DataHelper::holder_numeric()),
            Input::HolderOneSymbol => Some(DataHelper::holder_one_symbol()),
            Input::HolderSpecChar { count } => Some(DataHelper::holder_spec_char(*count)),
            Input::Cvc { digits } => Some(DataHelper::cvc(*digits)),
            Input::Literal { value } => Some(value.clone()),
        }
    }
}

/// Message expected under a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: Field,
    pub text: String,
}

impl FieldMessage {
    pub fn new(field: Field, text: &str) -> Self {
        Self {
            field,
            text: text.to_string(),
        }
    }
}

/// Expected outcome of a submitted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Success notification; approved record correlated with one order
    Approved,
    /// Error notification; record stored with DECLINED status
    Declined,
    /// Error notification; nothing stored
    Rejected,
    /// Validation messages under fields; the form is not sent
    FieldMessages(Vec<FieldMessage>),
}

/// One purchase attempt and its expected outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier, e.g. `debit-approved`
    pub id: String,

    /// Human-readable name
    pub name: String,

    pub kind: PurchaseKind,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Card to enter; `None` leaves the number empty
    #[serde(default)]
    pub card: Option<CardStatus>,

    #[serde(default)]
    pub month: Input,

    #[serde(default)]
    pub year: Input,

    #[serde(default)]
    pub owner: Input,

    #[serde(default)]
    pub cvc: Input,

    #[serde(rename = "expect", with = "serde_yaml::with::singleton_map")]
    pub expectation: Expectation,
}

impl Scenario {
    /// A filled form with a valid expiry, owner and CVC
    fn filled(kind: PurchaseKind, slug: &str, name: String, card: CardStatus, expectation: Expectation) -> Self {
        Self {
            id: format!("{}-{}", kind, slug),
            name,
            kind,
            tags: vec![kind.to_string()],
            card: Some(card),
            month: Input::MonthPlus { months: 0 },
            year: Input::YearPlus { years: 1 },
            owner: Input::Holder,
            cvc: Input::Cvc { digits: 3 },
            expectation,
        }
    }

    fn tagged(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    fn with_month(mut self, month: Input) -> Self {
        self.month = month;
        self
    }

    fn with_year(mut self, year: Input) -> Self {
        self.year = year;
        self
    }

    fn with_owner(mut self, owner: Input) -> Self {
        self.owner = owner;
        self
    }

    fn with_cvc(mut self, cvc: Input) -> Self {
        self.cvc = cvc;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether the tour price must be read before buying
    pub fn reads_price(&self) -> bool {
        self.kind == PurchaseKind::Debit && self.expectation == Expectation::Approved
    }

    /// Record the page steps for this scenario, resolving generated values
    pub fn page(&self, config: &SuiteConfig) -> TravelPurchasePage {
        let mut page = TravelPurchasePage::open(
            &config.app.url,
            config.selectors.clone(),
            config.browser.timeout_ms,
        );

        if self.reads_price() {
            page.capture_price();
        }
        match self.kind {
            PurchaseKind::Debit => page.buy(),
            PurchaseKind::Credit => page.buy_in_credit(),
        };

        if let Some(card) = self.card {
            page.input_card_number(card);
        }
        if let Some(month) = self.month.resolve() {
            page.input_month(&month);
        }
        if let Some(year) = self.year.resolve() {
            page.input_year(&year);
        }
        if let Some(owner) = self.owner.resolve() {
            page.input_owner(&owner);
        }
        if let Some(cvc) = self.cvc.resolve() {
            page.input_cvc(&cvc);
        }
        page.click_continue();

        match &self.expectation {
            Expectation::Approved => {
                page.expect_notification_ok();
            }
            Expectation::Declined | Expectation::Rejected => {
                page.expect_notification_error();
            }
            Expectation::FieldMessages(messages) => {
                for message in messages {
                    page.expect_field_message(message.field, &message.text);
                }
            }
        }

        page
    }

    /// Parse a scenario from YAML
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::ScenarioParse(format!("{}: {}", path.display(), e)))
    }
}

/// Scenarios for one purchase kind
pub fn catalog_for(kind: PurchaseKind) -> Vec<Scenario> {
    use CardStatus::*;

    let label = kind.label();
    let status = |card: CardStatus| format!("{} card payment with the {} status", label, card);
    let named = |what: &str| format!("{} card payment with {}", label, what);
    let message = |field: Field, text: &str| Expectation::FieldMessages(vec![FieldMessage::new(field, text)]);

    vec![
        Scenario::filled(kind, "approved", status(Approved), Approved, Expectation::Approved)
            .tagged("status")
            .tagged("smoke"),
        Scenario::filled(kind, "declined", status(Declined), Declined, Expectation::Declined)
            .tagged("status"),
        Scenario {
            id: format!("{}-empty-form", kind),
            name: format!("Empty fields in the form {}", kind),
            kind,
            tags: vec![kind.to_string(), "validation".to_string()],
            card: None,
            month: Input::Empty,
            year: Input::Empty,
            owner: Input::Empty,
            cvc: Input::Empty,
            expectation: Expectation::FieldMessages(
                Field::ALL
                    .into_iter()
                    .map(|field| FieldMessage::new(field, MSG_REQUIRED))
                    .collect(),
            ),
        },
        Scenario::filled(kind, "invalid", status(Invalid), Invalid, Expectation::Rejected)
            .tagged("status"),
        Scenario::filled(kind, "zero", status(Zero), Zero, Expectation::Rejected).tagged("status"),
        Scenario::filled(
            kind,
            "fifteen",
            status(Fifteen),
            Fifteen,
            message(Field::Number, MSG_WRONG_FORMAT),
        )
        .tagged("validation"),
        Scenario::filled(
            kind,
            "zero-month",
            named("zero month"),
            Approved,
            message(Field::Month, MSG_WRONG_EXPIRY),
        )
        .with_month(Input::Zero)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "month-over",
            format!("{} card payment exceeding range the month field", label),
            Approved,
            message(Field::Month, MSG_WRONG_EXPIRY),
        )
        .with_month(Input::MonthOver)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "month-one-digit",
            named("one digit in month field"),
            Approved,
            message(Field::Month, MSG_WRONG_FORMAT),
        )
        .with_month(Input::MonthOneDigit)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "zero-year",
            named("zero year field"),
            Approved,
            message(Field::Year, MSG_EXPIRED),
        )
        .with_year(Input::Zero)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "year-over",
            named("exceeding range the year field"),
            Approved,
            message(Field::Year, MSG_WRONG_EXPIRY),
        )
        .with_year(Input::YearPlus { years: 6 })
        .tagged("validation"),
        Scenario::filled(
            kind,
            "previous-year",
            named("previous year"),
            Approved,
            message(Field::Year, MSG_EXPIRED),
        )
        .with_year(Input::YearPlus { years: -1 })
        .tagged("validation"),
        Scenario::filled(
            kind,
            "cyrillic-owner",
            named("cyrillic name field"),
            Approved,
            message(Field::Owner, MSG_WRONG_FORMAT),
        )
        .with_owner(Input::HolderCyrillic)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "numeric-owner",
            named("numeric name field"),
            Approved,
            message(Field::Owner, MSG_WRONG_FORMAT),
        )
        .with_owner(Input::HolderNumeric)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "one-symbol-owner",
            named("one symbol name field"),
            Approved,
            message(Field::Owner, MSG_WRONG_FORMAT),
        )
        .with_owner(Input::HolderOneSymbol)
        .tagged("validation"),
        Scenario::filled(
            kind,
            "spec-char-owner",
            named("special characters name field"),
            Approved,
            message(Field::Owner, MSG_WRONG_FORMAT),
        )
        .with_owner(Input::HolderSpecChar { count: 6 })
        .tagged("validation"),
        Scenario::filled(
            kind,
            "two-digit-cvc",
            named("two digits in CVC field"),
            Approved,
            message(Field::Cvc, MSG_WRONG_FORMAT),
        )
        .with_cvc(Input::Cvc { digits: 2 })
        .tagged("validation"),
        Scenario::filled(
            kind,
            "one-digit-cvc",
            named("one digit in CVC field"),
            Approved,
            message(Field::Cvc, MSG_WRONG_FORMAT),
        )
        .with_cvc(Input::Cvc { digits: 1 })
        .tagged("validation"),
    ]
}

/// Built-in scenarios for every purchase kind
pub fn catalog() -> Vec<Scenario> {
    PurchaseKind::ALL.into_iter().flat_map(catalog_for).collect()
}

/// Load all YAML scenarios from a directory
pub fn load_dir(dir: &Path) -> E2eResult<Vec<Scenario>> {
    Ok(load_files(dir)?.into_iter().map(|(_, scenario)| scenario).collect())
}

fn load_files(dir: &Path) -> E2eResult<Vec<(PathBuf, Scenario)>> {
    let mut scenarios = Vec::new();

    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| E2eError::ScenarioParse(format!("{}: {}", dir.display(), e)))?;
        let is_yaml = entry
            .path()
            .extension()
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);
        if entry.file_type().is_file() && is_yaml {
            scenarios.push((entry.path().to_path_buf(), Scenario::from_file(entry.path())?));
        }
    }

    Ok(scenarios)
}

/// Built-in catalog plus the configured scenario directory
///
/// Scenario ids are unique across both sources.
pub fn load_all(config: &SuiteConfig) -> E2eResult<Vec<Scenario>> {
    let mut scenarios = catalog();
    let Some(dir) = &config.scenarios_dir else {
        return Ok(scenarios);
    };

    let mut ids: HashSet<String> = scenarios.iter().map(|s| s.id.clone()).collect();
    for (path, scenario) in load_files(dir)? {
        if !ids.insert(scenario.id.clone()) {
            return Err(E2eError::ScenarioParse(format!(
                "{}: duplicate scenario id {}",
                path.display(),
                scenario.id
            )));
        }
        scenarios.push(scenario);
    }
    Ok(scenarios)
}

/// Filter scenarios by tag
pub fn filter_by_tag<'a>(scenarios: &'a [Scenario], tag: &str) -> Vec<&'a Scenario> {
    scenarios.iter().filter(|s| s.has_tag(tag)).collect()
}

/// Find a scenario by id
pub fn find<'a>(scenarios: &'a [Scenario], id: &str) -> E2eResult<&'a Scenario> {
    scenarios
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| E2eError::ScenarioNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{CHECK_NOTIFICATION_ERROR, CHECK_NOTIFICATION_OK};
    use crate::playwright::Step;
    use test_case::test_case;

    #[test]
    fn test_catalog_size_and_unique_ids() {
        let scenarios = catalog();
        assert_eq!(scenarios.len(), 36);
        assert_eq!(catalog_for(PurchaseKind::Credit).len(), 18);

        let ids: HashSet<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), scenarios.len());
    }

    fn message(field: Field, text: &str) -> Expectation {
        Expectation::FieldMessages(vec![FieldMessage::new(field, text)])
    }

    #[test_case("approved", CardStatus::Approved, Expectation::Approved, CHECK_NOTIFICATION_OK)]
    #[test_case("declined", CardStatus::Declined, Expectation::Declined, CHECK_NOTIFICATION_ERROR)]
    #[test_case("invalid", CardStatus::Invalid, Expectation::Rejected, CHECK_NOTIFICATION_ERROR)]
    #[test_case("zero", CardStatus::Zero, Expectation::Rejected, CHECK_NOTIFICATION_ERROR)]
    #[test_case("fifteen", CardStatus::Fifteen, message(Field::Number, MSG_WRONG_FORMAT), "message:number")]
    #[test_case("zero-month", CardStatus::Approved, message(Field::Month, MSG_WRONG_EXPIRY), "message:month")]
    #[test_case("month-over", CardStatus::Approved, message(Field::Month, MSG_WRONG_EXPIRY), "message:month")]
    #[test_case("month-one-digit", CardStatus::Approved, message(Field::Month, MSG_WRONG_FORMAT), "message:month")]
    #[test_case("zero-year", CardStatus::Approved, message(Field::Year, MSG_EXPIRED), "message:year")]
    #[test_case("year-over", CardStatus::Approved, message(Field::Year, MSG_WRONG_EXPIRY), "message:year")]
    #[test_case("previous-year", CardStatus::Approved, message(Field::Year, MSG_EXPIRED), "message:year")]
    #[test_case("cyrillic-owner", CardStatus::Approved, message(Field::Owner, MSG_WRONG_FORMAT), "message:owner")]
    #[test_case("numeric-owner", CardStatus::Approved, message(Field::Owner, MSG_WRONG_FORMAT), "message:owner")]
    #[test_case("one-symbol-owner", CardStatus::Approved, message(Field::Owner, MSG_WRONG_FORMAT), "message:owner")]
    #[test_case("spec-char-owner", CardStatus::Approved, message(Field::Owner, MSG_WRONG_FORMAT), "message:owner")]
    #[test_case("two-digit-cvc", CardStatus::Approved, message(Field::Cvc, MSG_WRONG_FORMAT), "message:cvc")]
    #[test_case("one-digit-cvc", CardStatus::Approved, message(Field::Cvc, MSG_WRONG_FORMAT), "message:cvc")]
    fn test_catalog_expectations(slug: &str, card: CardStatus, expectation: Expectation, last_check: &str) {
        for kind in PurchaseKind::ALL {
            let scenarios = catalog_for(kind);
            let scenario = find(&scenarios, &format!("{}-{}", kind, slug)).unwrap();
            assert_eq!(scenario.card, Some(card));
            assert_eq!(scenario.expectation, expectation);

            let page = scenario.page(&SuiteConfig::default());
            match page.steps().last() {
                Some(Step::ExpectText { check, .. }) => assert_eq!(check, last_check),
                other => panic!("{} ends with {:?}", scenario.id, other),
            }
        }
    }

    #[test_case("zero-month", Input::Zero, Input::YearPlus { years: 1 })]
    #[test_case("month-over", Input::MonthOver, Input::YearPlus { years: 1 })]
    #[test_case("month-one-digit", Input::MonthOneDigit, Input::YearPlus { years: 1 })]
    #[test_case("zero-year", Input::MonthPlus { months: 0 }, Input::Zero)]
    #[test_case("year-over", Input::MonthPlus { months: 0 }, Input::YearPlus { years: 6 })]
    #[test_case("previous-year", Input::MonthPlus { months: 0 }, Input::YearPlus { years: -1 })]
    fn test_catalog_expiry_inputs(slug: &str, month: Input, year: Input) {
        for kind in PurchaseKind::ALL {
            let scenarios = catalog_for(kind);
            let scenario = find(&scenarios, &format!("{}-{}", kind, slug)).unwrap();
            assert_eq!(scenario.month, month);
            assert_eq!(scenario.year, year);
        }
    }

    #[test]
    fn test_catalog_owner_and_cvc_inputs() {
        let scenarios = catalog();
        let owner = |id: &str| find(&scenarios, id).unwrap().owner.clone();
        let cvc = |id: &str| find(&scenarios, id).unwrap().cvc.clone();

        assert_eq!(owner("debit-cyrillic-owner"), Input::HolderCyrillic);
        assert_eq!(owner("credit-numeric-owner"), Input::HolderNumeric);
        assert_eq!(owner("debit-one-symbol-owner"), Input::HolderOneSymbol);
        assert_eq!(owner("credit-spec-char-owner"), Input::HolderSpecChar { count: 6 });
        assert_eq!(cvc("debit-two-digit-cvc"), Input::Cvc { digits: 2 });
        assert_eq!(cvc("credit-one-digit-cvc"), Input::Cvc { digits: 1 });
        assert_eq!(cvc("debit-approved"), Input::Cvc { digits: 3 });
    }

    #[test]
    fn test_catalog_names() {
        let scenarios = catalog();
        let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Debit card payment with the APPROVED status"));
        assert!(names.contains(&"Credit card payment with the FIFTEEN status"));
        assert!(names.contains(&"Empty fields in the form credit"));
        assert!(names.contains(&"Debit card payment exceeding range the month field"));
        assert!(names.contains(&"Credit card payment with one digit in CVC field"));
    }

    #[test]
    fn test_find_and_filter() {
        let scenarios = catalog();
        let approved = find(&scenarios, "credit-approved").unwrap();
        assert_eq!(approved.expectation, Expectation::Approved);
        assert!(matches!(find(&scenarios, "nope"), Err(E2eError::ScenarioNotFound(_))));

        assert_eq!(filter_by_tag(&scenarios, "smoke").len(), 2);
        assert_eq!(filter_by_tag(&scenarios, "debit").len(), 18);
        assert_eq!(filter_by_tag(&scenarios, "STATUS").len(), 8);
    }

    #[test]
    fn test_empty_form_expects_every_field() {
        let scenarios = catalog();
        let empty = find(&scenarios, "debit-empty-form").unwrap();
        let Expectation::FieldMessages(messages) = &empty.expectation else {
            panic!("empty form must expect field messages");
        };
        assert_eq!(messages.len(), 5);
        assert!(messages.iter().all(|m| m.text == MSG_REQUIRED));

        let page = empty.page(&SuiteConfig::default());
        let types = page
            .steps()
            .iter()
            .filter(|s| matches!(s, Step::Type { .. } | Step::Fill { .. }))
            .count();
        assert_eq!(types, 0);
    }

    #[test]
    fn test_approved_debit_reads_price_first() {
        let scenarios = catalog();
        let debit = find(&scenarios, "debit-approved").unwrap();
        let credit = find(&scenarios, "credit-approved").unwrap();
        assert!(debit.reads_price());
        assert!(!credit.reads_price());

        let steps = debit.page(&SuiteConfig::default()).steps().to_vec();
        assert!(matches!(steps[1], Step::Capture { .. }));
        assert_eq!(steps.len(), 10);
    }

    #[test]
    fn test_input_resolution() {
        assert_eq!(Input::Empty.resolve(), None);
        assert_eq!(Input::Zero.resolve().as_deref(), Some("00"));
        assert_eq!(Input::MonthOver.resolve().as_deref(), Some("13"));
        assert_eq!(Input::Cvc { digits: 2 }.resolve().map(|c| c.len()), Some(2));
        assert_eq!(
            Input::Literal { value: "12".to_string() }.resolve().as_deref(),
            Some("12")
        );
    }

    #[test]
    fn test_parse_yaml_scenario() {
        let yaml = r#"
id: debit-far-expiry
name: Debit card payment expiring in five years
kind: debit
tags: [debit, validation]
card: APPROVED
month: { input: month_plus, months: 0 }
year: { input: year_plus, years: 5 }
owner: { input: holder }
cvc: { input: cvc, digits: 3 }
expect: approved
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.kind, PurchaseKind::Debit);
        assert_eq!(scenario.card, Some(CardStatus::Approved));
        assert_eq!(scenario.year, Input::YearPlus { years: 5 });
        assert_eq!(scenario.expectation, Expectation::Approved);
    }

    #[test]
    fn test_parse_yaml_field_messages() {
        let yaml = r#"
id: credit-empty-cvc
name: Credit form without CVC
kind: credit
card: APPROVED
month: { input: month_plus, months: 1 }
year: { input: year_plus, years: 1 }
owner: { input: literal, value: "IVAN IVANOV" }
expect:
  field_messages:
    - field: cvc
      text: Поле обязательно для заполнения
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.cvc, Input::Empty);
        assert_eq!(
            scenario.expectation,
            Expectation::FieldMessages(vec![FieldMessage::new(Field::Cvc, MSG_REQUIRED)])
        );
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extra.yaml"),
            "id: x\nname: X\nkind: credit\nexpect: rejected\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let scenarios = load_dir(dir.path()).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].expectation, Expectation::Rejected);

        std::fs::write(dir.path().join("broken.yml"), "id: [").unwrap();
        assert!(matches!(load_dir(dir.path()), Err(E2eError::ScenarioParse(_))));
    }

    #[test]
    fn test_load_dir_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("scenarios");
        assert!(matches!(load_dir(&missing), Err(E2eError::ScenarioParse(_))));
    }

    #[test]
    fn test_load_all_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("shadow.yaml"),
            "id: debit-approved\nname: Shadow\nkind: debit\nexpect: approved\n",
        )
        .unwrap();

        let config = SuiteConfig {
            scenarios_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = load_all(&config).unwrap_err();
        assert!(matches!(err, E2eError::ScenarioParse(_)));
        assert!(err.to_string().contains("shadow.yaml"));
        assert!(err.to_string().contains("debit-approved"));
    }

    #[test]
    fn test_field_messages_yaml_round_trip() {
        let scenarios = catalog();
        let scenario = find(&scenarios, "credit-zero-year").unwrap();
        let yaml = serde_yaml::to_string(scenario).unwrap();
        assert!(yaml.contains("field_messages"));

        let parsed = Scenario::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.expectation, scenario.expectation);
        assert_eq!(parsed.year, Input::Zero);
    }
}
