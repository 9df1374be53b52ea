//! Field presence and strict value validation

use super::passport::{Field, Passport};
use itertools::Itertools;
use log::info;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

static HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(cm|in)$").expect("height pattern is valid"));
static HAIR_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-f]{6}$").expect("hair color pattern is valid"));
static PASSPORT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9}$").expect("passport id pattern is valid"));

const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

type Rule = fn(&str) -> bool;

/// Value rules, in the order diagnostics report the first failure
pub const RULES: [(Field, Rule); 7] = [
    (Field::BirthYear, birth_year),
    (Field::IssueYear, issue_year),
    (Field::ExpirationYear, expiration_year),
    (Field::Height, height),
    (Field::HairColor, hair_color),
    (Field::EyeColor, eye_color),
    (Field::PassportId, passport_id),
];

/// Integer within `range`; a leading `+` parses, whitespace does not
fn number_in(value: &str, range: RangeInclusive<u32>) -> bool {
    value.parse::<u32>().is_ok_and(|n| range.contains(&n))
}

fn birth_year(value: &str) -> bool {
    number_in(value, 1920..=2002)
}

fn issue_year(value: &str) -> bool {
    number_in(value, 2010..=2020)
}

fn expiration_year(value: &str) -> bool {
    number_in(value, 2020..=2030)
}

fn height(value: &str) -> bool {
    let Some(caps) = HEIGHT.captures(value) else {
        return false;
    };
    match &caps[2] {
        "cm" => number_in(&caps[1], 150..=193),
        "in" => number_in(&caps[1], 59..=76),
        _ => false,
    }
}

fn hair_color(value: &str) -> bool {
    HAIR_COLOR.is_match(value)
}

fn eye_color(value: &str) -> bool {
    EYE_COLORS.contains(&value)
}

fn passport_id(value: &str) -> bool {
    PASSPORT_ID.is_match(value)
}

/// Which validator a count or export applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// All required fields present, values unchecked
    #[default]
    Presence,
    /// Required fields present and every value within its rule
    Strict,
}

impl Validation {
    pub fn accepts(self, passport: &Passport) -> bool {
        match self {
            Validation::Presence => passport.has_required_fields(),
            Validation::Strict => passport.is_strictly_valid(),
        }
    }
}

impl Passport {
    /// Every required field is present, whatever its value
    pub fn has_required_fields(&self) -> bool {
        Field::REQUIRED
            .iter()
            .all(|field| self.field(*field).is_some())
    }

    /// Whether `field` is present with a value its rule accepts.
    ///
    /// `cid` has no rule and is always accepted.
    pub fn field_is_valid(&self, field: Field) -> bool {
        match RULES.iter().find(|(f, _)| *f == field) {
            Some((_, rule)) => self.field(field).is_some_and(|value| rule(value)),
            None => true,
        }
    }

    /// First required field, in rule order, that is missing or malformed
    pub fn first_invalid_field(&self) -> Option<Field> {
        RULES
            .iter()
            .map(|(field, _)| *field)
            .find(|field| !self.field_is_valid(*field))
    }

    /// Presence check plus every field rule
    pub fn is_strictly_valid(&self) -> bool {
        self.has_required_fields()
            && RULES
                .iter()
                .all(|(field, rule)| self.field(*field).is_some_and(|value| rule(value)))
    }

    /// Strict validation with optional diagnostics.
    ///
    /// `verbose` only controls logging; the result is always
    /// [`Passport::is_strictly_valid`].
    pub fn validate(&self, verbose: bool) -> bool {
        let valid = self.is_strictly_valid();
        if verbose {
            match self.first_invalid_field() {
                Some(field) => info!(
                    "failed validation for field {}: {}",
                    field,
                    self.field(field).unwrap_or("<missing>")
                ),
                None => info!(
                    "valid: {}",
                    RULES
                        .iter()
                        .map(|(field, _)| format!("{}:{}", field, self.field(*field).unwrap_or("")))
                        .join(" ")
                ),
            }
        }
        valid
    }
}

/// Number of passports accepted by `validation`
pub fn count_valid(records: &[Passport], validation: Validation) -> usize {
    records.iter().filter(|p| validation.accepts(p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    /// Records messages on the thread that logged them
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            CAPTURED.with(|lines| lines.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INSTALL: Once = Once::new();

    /// Run `f` and return what it logged on this thread
    fn logged(f: impl FnOnce()) -> Vec<String> {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger in this test binary");
            log::set_max_level(LevelFilter::Trace);
        });
        CAPTURED.with(|lines| lines.borrow_mut().clear());
        f();
        CAPTURED.with(|lines| lines.take())
    }

    #[test]
    fn test_year_boundaries() {
        assert!(birth_year("1920"));
        assert!(birth_year("2002"));
        assert!(!birth_year("1919"));
        assert!(!birth_year("2003"));
        assert!(issue_year("2010") && issue_year("2020"));
        assert!(!issue_year("2009") && !issue_year("2021"));
        assert!(expiration_year("2020") && expiration_year("2030"));
        assert!(!expiration_year("2019") && !expiration_year("2031"));
    }

    #[test]
    fn test_year_accepts_any_integer_spelling() {
        assert!(birth_year("+1950"));
        assert!(birth_year("01950"));
        assert!(!birth_year("+1919"));
        assert!(!birth_year("-1950"));
    }

    #[test]
    fn test_year_rejects_non_numbers() {
        assert!(!birth_year(""));
        assert!(!birth_year(" 1950"));
        assert!(!birth_year("19.5"));
        assert!(!birth_year("abcd"));
        assert!(!birth_year("99999999999999999999"));
    }

    #[test]
    fn test_height() {
        assert!(!height("149cm"));
        assert!(height("150cm"));
        assert!(height("193cm"));
        assert!(!height("194cm"));
        assert!(height("60in"));
        assert!(height("59in") && height("76in"));
        assert!(!height("58in") && !height("77in"));
        assert!(!height("190in"));
        assert!(!height("190"));
        assert!(!height("cm"));
        assert!(!height("170mm"));
        assert!(!height("x170cm"));
        assert!(!height("170cmx"));
    }

    #[test]
    fn test_hair_color() {
        assert!(hair_color("#123abc"));
        assert!(!hair_color("#123abz"));
        assert!(!hair_color("123abc"));
        assert!(!hair_color("#123ABC"));
        assert!(!hair_color("#123abcd"));
    }

    #[test]
    fn test_eye_color() {
        for color in EYE_COLORS {
            assert!(eye_color(color));
        }
        assert!(!eye_color("wat"));
        assert!(!eye_color("brnbrn"));
        assert!(!eye_color(""));
    }

    #[test]
    fn test_passport_id() {
        assert!(passport_id("000000001"));
        assert!(!passport_id("0123456789"));
        assert!(!passport_id("12345678"));
        assert!(!passport_id("-12345678"));
    }

    #[test]
    fn test_first_invalid_field_order() {
        let passport: Passport = "pid:1 hgt:170 byr:1950 iyr:2015 eyr:2025 hcl:#000000 ecl:amb"
            .parse()
            .unwrap();
        assert_eq!(passport.first_invalid_field(), Some(Field::Height));
        assert!(!passport.is_strictly_valid());
        assert!(!passport.validate(true));

        let missing: Passport = "byr:1950".parse().unwrap();
        assert_eq!(missing.first_invalid_field(), Some(Field::IssueYear));
    }

    #[test]
    fn test_cid_is_ignored() {
        let passport: Passport = "hcl:#888785 hgt:164cm byr:2001 iyr:2015 cid:not-a-number pid:545766238 ecl:hzl eyr:2022"
            .parse()
            .unwrap();
        assert!(passport.field_is_valid(Field::CountryId));
        assert_eq!(passport.first_invalid_field(), None);
        assert!(passport.validate(false));
        assert!(passport.validate(true));
    }

    #[test]
    fn test_verbose_logs_first_failing_field() {
        let passport: Passport = "pid:1 hgt:170 byr:1950 iyr:2015 eyr:2025 hcl:#000000 ecl:amb"
            .parse()
            .unwrap();
        let lines = logged(|| assert!(!passport.validate(true)));
        assert_eq!(lines, ["failed validation for field hgt: 170"]);

        let missing: Passport = "byr:1950".parse().unwrap();
        let lines = logged(|| assert!(!missing.validate(true)));
        assert_eq!(lines, ["failed validation for field iyr: <missing>"]);
    }

    #[test]
    fn test_verbose_logs_valid_record_in_rule_order() {
        let passport: Passport = "pid:545766238 ecl:hzl eyr:2022 hcl:#888785 hgt:164cm byr:2001 iyr:2015 cid:88"
            .parse()
            .unwrap();
        let lines = logged(|| assert!(passport.validate(true)));
        assert_eq!(
            lines,
            ["valid: byr:2001 iyr:2015 eyr:2022 hgt:164cm hcl:#888785 ecl:hzl pid:545766238"]
        );
    }

    #[test]
    fn test_quiet_validation_logs_nothing() {
        let passport: Passport = "byr:1950".parse().unwrap();
        assert!(logged(|| assert!(!passport.validate(false))).is_empty());
    }
}
