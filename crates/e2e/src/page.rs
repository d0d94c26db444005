//! Page object for the tour purchase page
//!
//! Methods record browser steps; [`TravelPurchasePage::run`] plays them in a
//! single browser session and returns what the page showed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use travelpay_common::config::Selectors;
use travelpay_common::CardStatus;

use crate::check::CheckResult;
use crate::error::E2eResult;
use crate::playwright::{PlaywrightHandle, ScriptOutcome, Step};

/// Capture name of the tour price text
pub const PRICE_CAPTURE: &str = "price";

pub const CHECK_NOTIFICATION_OK: &str = "notification_ok";
pub const CHECK_NOTIFICATION_ERROR: &str = "notification_error";

/// Text of the success notification
pub const NOTIFICATION_OK_TEXT: &str = "Операция одобрена Банком.";
/// Text of the failure notification
pub const NOTIFICATION_ERROR_TEXT: &str = "Ошибка! Банк отказал в проведении операции.";

/// Purchase form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Number,
    Month,
    Year,
    Owner,
    Cvc,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Number, Field::Month, Field::Year, Field::Owner, Field::Cvc];

    /// Label text above the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Number => "Номер карты",
            Field::Month => "Месяц",
            Field::Year => "Год",
            Field::Owner => "Владелец",
            Field::Cvc => "CVC/CVV",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Number => "number",
            Field::Month => "month",
            Field::Year => "year",
            Field::Owner => "owner",
            Field::Cvc => "cvc",
        }
    }

    /// Name of the check waiting for this field's message
    pub fn message_check(&self) -> String {
        format!("message:{}", self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tour purchase page
#[derive(Debug, Clone)]
pub struct TravelPurchasePage {
    selectors: Selectors,
    wait_timeout_ms: u64,
    steps: Vec<Step>,
}

impl TravelPurchasePage {
    /// Start a session on the purchase page
    pub fn open(url: &str, selectors: Selectors, wait_timeout_ms: u64) -> Self {
        Self {
            selectors,
            wait_timeout_ms,
            steps: vec![Step::Open { url: url.to_string() }],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Read the tour price shown on the page
    pub fn capture_price(&mut self) -> &mut Self {
        self.steps.push(Step::Capture {
            name: PRICE_CAPTURE.to_string(),
            selector: self.selectors.price.clone(),
        });
        self
    }

    /// Open the debit card form
    pub fn buy(&mut self) -> &mut Self {
        self.click(self.selectors.buy_button.clone())
    }

    /// Open the credit form
    pub fn buy_in_credit(&mut self) -> &mut Self {
        self.click(self.selectors.buy_in_credit_button.clone())
    }

    pub fn input_card_number(&mut self, status: CardStatus) -> &mut Self {
        self.type_into(Field::Number, status.number())
    }

    pub fn input_month(&mut self, month: &str) -> &mut Self {
        self.type_into(Field::Month, month)
    }

    pub fn input_year(&mut self, year: &str) -> &mut Self {
        self.type_into(Field::Year, year)
    }

    pub fn input_owner(&mut self, owner: &str) -> &mut Self {
        self.steps.push(Step::Fill {
            selector: self.selectors.field_input(Field::Owner.label()),
            value: owner.to_string(),
        });
        self
    }

    pub fn input_cvc(&mut self, cvc: &str) -> &mut Self {
        self.type_into(Field::Cvc, cvc)
    }

    pub fn click_continue(&mut self) -> &mut Self {
        self.click(self.selectors.continue_button.clone())
    }

    /// Wait for the bank approval notification
    pub fn expect_notification_ok(&mut self) -> &mut Self {
        self.steps.push(Step::ExpectText {
            check: CHECK_NOTIFICATION_OK.to_string(),
            selector: self.selectors.notification_ok.clone(),
            text: NOTIFICATION_OK_TEXT.to_string(),
            timeout_ms: self.wait_timeout_ms,
        });
        self
    }

    /// Wait for the bank refusal notification
    pub fn expect_notification_error(&mut self) -> &mut Self {
        self.steps.push(Step::ExpectText {
            check: CHECK_NOTIFICATION_ERROR.to_string(),
            selector: self.selectors.notification_error.clone(),
            text: NOTIFICATION_ERROR_TEXT.to_string(),
            timeout_ms: self.wait_timeout_ms,
        });
        self
    }

    /// Wait for a validation message under a field
    pub fn expect_field_message(&mut self, field: Field, text: &str) -> &mut Self {
        self.steps.push(Step::ExpectText {
            check: field.message_check(),
            selector: self.selectors.field_message(field.label()),
            text: text.to_string(),
            timeout_ms: self.wait_timeout_ms,
        });
        self
    }

    /// Play the recorded steps
    pub async fn run(&self, driver: &PlaywrightHandle, screenshot: &str) -> E2eResult<PageOutcome> {
        let outcome = driver.run(&self.steps, screenshot).await?;
        Ok(PageOutcome { outcome })
    }

    fn click(&mut self, selector: String) -> &mut Self {
        self.steps.push(Step::Click { selector });
        self
    }

    fn type_into(&mut self, field: Field, text: &str) -> &mut Self {
        self.steps.push(Step::Type {
            selector: self.selectors.field_input(field.label()),
            text: text.to_string(),
        });
        self
    }
}

/// What the page showed during a run
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    pub outcome: ScriptOutcome,
}

impl PageOutcome {
    /// Tour price in kopecks, parsed from the captured price text
    pub fn price_in_kops(&self) -> Option<i64> {
        self.outcome
            .captures
            .get(PRICE_CAPTURE)
            .and_then(|text| parse_price_in_kops(text))
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.outcome.checks
    }
}

/// Parse a ruble amount such as "Всего 45 000 руб." into kopecks
pub fn parse_price_in_kops(text: &str) -> Option<i64> {
    let re = Regex::new(r"\d[\d\s\u{a0}]*").ok()?;
    let digits: String = re
        .find(text)?
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<i64>().ok()?.checked_mul(100)
}
