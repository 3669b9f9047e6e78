//! Automaton states and the state transition table

use super::category::CharCategory;

/// Where the field automaton is within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadState {
    /// Start of a line, or after a field that ended before a comment
    SeekingField,
    /// Just past a separator, looking for the next field
    SeekingStart,
    /// Inside an unquoted field
    InPlainField,
    /// Inside a quoted field
    InQuotedField,
    /// Just read a quote that may close the field or start a doubled quote
    AfterEndQuote,
    /// In blanks after a closed quoted field, before the separator
    SkippingTailAfterQuote,
}

impl ReadState {
    /// Whether a field ending in this state was quoted
    pub fn is_quoted(self) -> bool {
        matches!(
            self,
            ReadState::InQuotedField | ReadState::AfterEndQuote | ReadState::SkippingTailAfterQuote
        )
    }
}

/// Character the automaton expected when it rejects input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Separator,
    Quote,
}

/// What the scanner does with one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Skip the character
    Ignore,
    /// Copy the character into the field
    Append,
    /// Add a single space, collapsing whitespace runs
    AppendSpace,
    /// Change state without touching the field
    Enter(ReadState),
    /// Copy the character and change state
    AppendAndEnter(ReadState),
    /// Separator: return the field, continue after the separator
    EndField,
    /// Comment start: return the field, leave the comment for the next call
    EndFieldBeforeComment,
    /// Comment start where a comment may begin
    Comment,
    /// Illegal input
    Reject(Expected),
}

/// The transition table.
///
/// Pure function of `(state, category)`; every pair is covered.
pub fn transition(state: ReadState, category: CharCategory) -> Action {
    use Action::*;
    use CharCategory as C;
    use ReadState as S;

    match (state, category) {
        (S::SeekingField | S::SeekingStart, C::CommentStart) => Comment,
        (S::SeekingField | S::SeekingStart, C::Ordinary) => AppendAndEnter(S::InPlainField),
        (S::SeekingField | S::SeekingStart, C::Quote) => Enter(S::InQuotedField),
        (S::SeekingField | S::SeekingStart, C::Separator) => EndField,
        (S::SeekingField | S::SeekingStart, C::Whitespace) => Ignore,

        (S::InPlainField, C::CommentStart) => EndFieldBeforeComment,
        (S::InPlainField, C::Ordinary) => Append,
        (S::InPlainField, C::Quote) => Reject(Expected::Quote),
        (S::InPlainField, C::Separator) => EndField,
        (S::InPlainField, C::Whitespace) => AppendSpace,

        // only the quote is special inside quotes
        (S::InQuotedField, C::Quote) => Enter(S::AfterEndQuote),
        (S::InQuotedField, C::CommentStart | C::Ordinary | C::Separator | C::Whitespace) => Append,

        (S::AfterEndQuote, C::CommentStart) => EndFieldBeforeComment,
        (S::AfterEndQuote, C::Ordinary) => Reject(Expected::Separator),
        (S::AfterEndQuote, C::Quote) => AppendAndEnter(S::InQuotedField),
        (S::AfterEndQuote, C::Separator) => EndField,
        (S::AfterEndQuote, C::Whitespace) => Enter(S::SkippingTailAfterQuote),

        (S::SkippingTailAfterQuote, C::CommentStart) => EndFieldBeforeComment,
        (S::SkippingTailAfterQuote, C::Ordinary | C::Quote) => Reject(Expected::Separator),
        (S::SkippingTailAfterQuote, C::Separator) => EndField,
        (S::SkippingTailAfterQuote, C::Whitespace) => Ignore,
    }
}
