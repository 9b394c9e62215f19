pub mod checker;
pub mod form;
pub mod hashing;
pub mod security;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiTab {
    #[default]
    Hashing,
    Checker,
    Security,
}

impl UiTab {
    pub const ALL: [UiTab; 3] = [UiTab::Hashing, UiTab::Checker, UiTab::Security];

    pub fn title(self) -> &'static str {
        match self {
            UiTab::Hashing => "Hashing",
            UiTab::Checker => "Checker",
            UiTab::Security => "Security",
        }
    }
}
