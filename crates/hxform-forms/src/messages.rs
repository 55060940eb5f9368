//! User-facing messages.
//!
//! Engine errors are classified into the fixed [`ErrorMessage`] taxonomy and
//! then rendered by a [`Translator`], which is passed explicitly to the
//! converter, validator, and generator. Two catalogs ship with the crate:
//! [`English`] (the default) and [`Japanese`].

use std::fmt;
use std::sync::Arc;

use hxform_core::ValidationError;

/// The kinds of validation failure shown to users.
///
/// Bound variants carry the bound as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    /// The string is too short.
    TooShort,
    /// The string is too long.
    TooLong,
    /// A generic invalid value.
    ValueError,
    /// The value has the wrong type.
    TypeMismatch,
    /// A required value is missing.
    Required,
    /// The value is not an integer.
    IntegerParse,
    /// The value is not a number.
    FloatParse,
    /// The value is not a boolean.
    BooleanParse,
    /// The value is not a date.
    DateParse,
    /// The value does not match the pattern.
    PatternMismatch,
    /// The value is below an inclusive minimum.
    BelowMinimum(String),
    /// The value is above an inclusive maximum.
    AboveMaximum(String),
    /// The value is not above an exclusive minimum.
    NotGreaterThan(String),
    /// The value is not below an exclusive maximum.
    NotLessThan(String),
    /// Any other failure; holds the engine's raw message.
    Other(String),
}

impl ErrorMessage {
    /// Classifies an engine error by its code.
    ///
    /// # Examples
    ///
    /// ```
    /// use hxform_core::ValidationError;
    /// use hxform_forms::messages::ErrorMessage;
    ///
    /// let err = ValidationError::new("Input should be greater than or equal to 18", "greater_than_equal")
    ///     .with_param("ge", "18");
    /// assert_eq!(ErrorMessage::from_error(&err), ErrorMessage::BelowMinimum("18".into()));
    ///
    /// let err = ValidationError::new("Input should be 'a' or 'b'", "literal_error");
    /// assert_eq!(
    ///     ErrorMessage::from_error(&err),
    ///     ErrorMessage::Other("Input should be 'a' or 'b'".into())
    /// );
    /// ```
    pub fn from_error(error: &ValidationError) -> Self {
        let bound = |key: &str| error.param(key).unwrap_or_default().to_string();
        match error.code.as_str() {
            "string_too_short" => Self::TooShort,
            "string_too_long" => Self::TooLong,
            "value_error" => Self::ValueError,
            "type_error" => Self::TypeMismatch,
            "missing" => Self::Required,
            "int_parsing" => Self::IntegerParse,
            "float_parsing" => Self::FloatParse,
            "bool_parsing" => Self::BooleanParse,
            "date_parsing" | "date_from_datetime_parsing" => Self::DateParse,
            "string_pattern_mismatch" => Self::PatternMismatch,
            "greater_than_equal" => Self::BelowMinimum(bound("ge")),
            "less_than_equal" => Self::AboveMaximum(bound("le")),
            "greater_than" => Self::NotGreaterThan(bound("gt")),
            "less_than" => Self::NotLessThan(bound("lt")),
            _ => Self::Other(error.message.clone()),
        }
    }
}

/// Renders user-facing text in one language.
///
/// Implementations are pure: the same input always yields the same text.
pub trait Translator: Send + Sync + fmt::Debug {
    /// The language code of this catalog (e.g. `"en"`).
    fn language_code(&self) -> &str;

    /// Renders a classified error.
    fn message(&self, message: &ErrorMessage) -> String;

    /// The message for a field name the schema does not declare.
    fn unknown_field(&self, name: &str) -> String;

    /// The banner shown when a submission has no problems.
    fn no_problems(&self) -> String;

    /// The label of the empty option of an optional select.
    fn select_placeholder(&self) -> String;

    /// The default submit button label.
    fn submit_label(&self) -> String;

    /// The message for a required value that is missing.
    fn required(&self) -> String {
        self.message(&ErrorMessage::Required)
    }

    /// Classifies and renders an engine error.
    fn translate(&self, error: &ValidationError) -> String {
        self.message(&ErrorMessage::from_error(error))
    }
}

/// The English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn language_code(&self) -> &str {
        "en"
    }

    fn message(&self, message: &ErrorMessage) -> String {
        match message {
            ErrorMessage::TooShort => "This value is too short".into(),
            ErrorMessage::TooLong => "This value is too long".into(),
            ErrorMessage::ValueError => "Invalid value".into(),
            ErrorMessage::TypeMismatch => "Invalid type".into(),
            ErrorMessage::Required => "This field is required".into(),
            ErrorMessage::IntegerParse => "Enter a whole number".into(),
            ErrorMessage::FloatParse => "Enter a number".into(),
            ErrorMessage::BooleanParse => "Enter true or false".into(),
            ErrorMessage::DateParse => "Enter a valid date".into(),
            ErrorMessage::PatternMismatch => "This value does not match the required pattern".into(),
            ErrorMessage::BelowMinimum(b) => format!("This value must be at least {b}"),
            ErrorMessage::AboveMaximum(b) => format!("This value must be at most {b}"),
            ErrorMessage::NotGreaterThan(b) => format!("This value must be greater than {b}"),
            ErrorMessage::NotLessThan(b) => format!("This value must be less than {b}"),
            ErrorMessage::Other(raw) if raw.is_empty() => "Invalid input".into(),
            ErrorMessage::Other(raw) => raw.clone(),
        }
    }

    fn unknown_field(&self, name: &str) -> String {
        format!("unknown field: {name}")
    }

    fn no_problems(&self) -> String {
        "No problems found".into()
    }

    fn select_placeholder(&self) -> String {
        "Please select".into()
    }

    fn submit_label(&self) -> String {
        "Submit".into()
    }
}

/// The Japanese catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Japanese;

impl Translator for Japanese {
    fn language_code(&self) -> &str {
        "ja"
    }

    fn message(&self, message: &ErrorMessage) -> String {
        match message {
            ErrorMessage::TooShort => "この値は短すぎます".into(),
            ErrorMessage::TooLong => "この値は長すぎます".into(),
            ErrorMessage::ValueError => "値が無効です".into(),
            ErrorMessage::TypeMismatch => "型が正しくありません".into(),
            ErrorMessage::Required => "このフィールドは必須です".into(),
            ErrorMessage::IntegerParse => "整数を入力してください".into(),
            ErrorMessage::FloatParse => "数値を入力してください".into(),
            ErrorMessage::BooleanParse => "真偽値を入力してください".into(),
            ErrorMessage::DateParse => "有効な日付を入力してください".into(),
            ErrorMessage::PatternMismatch => "パターンに一致しません".into(),
            ErrorMessage::BelowMinimum(b) => format!("この値は{b}以上である必要があります"),
            ErrorMessage::AboveMaximum(b) => format!("この値は{b}以下である必要があります"),
            ErrorMessage::NotGreaterThan(b) => format!("この値は{b}より大きい必要があります"),
            ErrorMessage::NotLessThan(b) => format!("この値は{b}より小さい必要があります"),
            ErrorMessage::Other(raw) if raw.is_empty() => "入力エラーです".into(),
            ErrorMessage::Other(raw) => raw.clone(),
        }
    }

    fn unknown_field(&self, name: &str) -> String {
        format!("不明なフィールド: {name}")
    }

    fn no_problems(&self) -> String {
        "入力内容に問題はありません".into()
    }

    fn select_placeholder(&self) -> String {
        "選択してください".into()
    }

    fn submit_label(&self) -> String {
        "送信".into()
    }
}

/// Picks the catalog for a language code: `ja` and its regional variants get
/// [`Japanese`], everything else [`English`].
pub fn translator_for(language_code: &str) -> Arc<dyn Translator> {
    let primary = language_code
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if primary == "ja" {
        Arc::new(Japanese)
    } else {
        Arc::new(English)
    }
}

/// The default catalog.
pub fn default_translator() -> Arc<dyn Translator> {
    Arc::new(English)
}
