//! User and system actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Char(char),
    Backspace,
    ClearField,
    Submit,
    CheckApi,

    FocusNext,
    FocusPrev,
    CycleNext,
    CyclePrev,
}
