//! Test data generators for the purchase form
//!
//! Every generator has a `*_with` variant that takes the random source (and
//! the reference date where it matters) explicitly.

use chrono::{Datelike, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "IVAN", "MARIA", "PETR", "ANNA", "SERGEY", "OLGA", "DMITRY", "ELENA", "ALEXEY", "NATALIA",
    "MIKHAIL", "TATIANA", "ANDREY", "IRINA", "PAVEL",
];

const LAST_NAMES: &[&str] = &[
    "IVANOV", "PETROVA", "SIDOROV", "SMIRNOVA", "KUZNETSOV", "POPOVA", "VASILIEV", "SOKOLOVA",
    "MOROZOV", "VOLKOVA", "LEBEDEV", "KOZLOVA", "NOVIKOV", "ORLOVA",
];

const CYRILLIC_FIRST_NAMES: &[&str] = &[
    "ИВАН", "МАРИЯ", "ПЁТР", "АННА", "СЕРГЕЙ", "ОЛЬГА", "ДМИТРИЙ", "ЕЛЕНА", "АЛЕКСЕЙ",
];

const CYRILLIC_LAST_NAMES: &[&str] = &[
    "ИВАНОВ", "ПЕТРОВА", "СИДОРОВ", "СМИРНОВА", "КУЗНЕЦОВ", "ПОПОВА", "ВОЛКОВ", "ОРЛОВА",
];

const SPECIAL_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '=', '?', '~', ';', ':',
];

/// Stateless generators for form values
pub struct DataHelper;

impl DataHelper {
    /// Two-digit month of the current date shifted by `months`
    pub fn month_plus(months: i32) -> String {
        Self::month_plus_from(today(), months)
    }

    pub fn month_plus_from(today: NaiveDate, months: i32) -> String {
        let month0 = (today.month0() as i64 + months as i64).rem_euclid(12);
        format!("{:02}", month0 + 1)
    }

    /// Two-digit year of the current date shifted by `years`
    pub fn year_plus(years: i32) -> String {
        Self::year_plus_from(today(), years)
    }

    pub fn year_plus_from(today: NaiveDate, years: i32) -> String {
        format!("{:02}", (today.year() + years).rem_euclid(100))
    }

    /// Zero value accepted by both the month and the year inputs
    pub fn zero() -> String {
        "00".to_string()
    }

    /// First month number past December
    pub fn month_over() -> String {
        "13".to_string()
    }

    /// A month typed with a single digit
    pub fn month_one_digit() -> String {
        Self::month_one_digit_with(&mut rand::thread_rng())
    }

    pub fn month_one_digit_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        rng.gen_range(1..=9u8).to_string()
    }

    /// Latin `FIRST LAST` holder name
    pub fn holder() -> String {
        Self::holder_with(&mut rand::thread_rng())
    }

    pub fn holder_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        pick_name(rng, FIRST_NAMES, LAST_NAMES)
    }

    /// Cyrillic holder name, rejected by the owner field
    pub fn holder_cyrillic() -> String {
        Self::holder_cyrillic_with(&mut rand::thread_rng())
    }

    pub fn holder_cyrillic_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        pick_name(rng, CYRILLIC_FIRST_NAMES, CYRILLIC_LAST_NAMES)
    }

    /// Holder made of digits only
    pub fn holder_numeric() -> String {
        Self::holder_numeric_with(&mut rand::thread_rng())
    }

    pub fn holder_numeric_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        let len = rng.gen_range(6..=12);
        digits(rng, len)
    }

    /// Holder made of a single Latin letter
    pub fn holder_one_symbol() -> String {
        Self::holder_one_symbol_with(&mut rand::thread_rng())
    }

    pub fn holder_one_symbol_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        char::from(rng.gen_range(b'A'..=b'Z')).to_string()
    }

    /// Latin holder name with `count` special characters injected
    pub fn holder_spec_char(count: usize) -> String {
        Self::holder_spec_char_with(&mut rand::thread_rng(), count)
    }

    pub fn holder_spec_char_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
        let mut chars: Vec<char> = Self::holder_with(rng).chars().collect();
        for _ in 0..count {
            let at = rng.gen_range(0..=chars.len());
            let special = *SPECIAL_CHARS.choose(rng).unwrap_or(&'#');
            chars.insert(at, special);
        }
        chars.into_iter().collect()
    }

    /// CVC/CVV code with the given number of digits
    pub fn cvc(digits_count: usize) -> String {
        Self::cvc_with(&mut rand::thread_rng(), digits_count)
    }

    pub fn cvc_with<R: Rng + ?Sized>(rng: &mut R, digits_count: usize) -> String {
        digits(rng, digits_count)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn pick_name<R: Rng + ?Sized>(rng: &mut R, first: &[&str], last: &[&str]) -> String {
    let first = first.choose(rng).copied().unwrap_or_default();
    let last = last.choose(rng).copied().unwrap_or_default();
    format!("{} {}", first, last)
}

fn digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
