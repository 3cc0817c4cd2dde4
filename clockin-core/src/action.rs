/// Every user interaction produces an Action. The UI never calls the backend directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Identifier entry
    InputPush(char),
    InputPop,
    InputDeleteWord,
    InputClear,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Screen flow
    Submit,
    CheckIn,
    CheckOut,
    /// Cancel on the profile screen, "Return now" / "Try again" on terminal screens
    Reset,
}
