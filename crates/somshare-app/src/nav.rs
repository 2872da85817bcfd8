/// Which screen is shown. A single in-memory value: no history, no
/// URL sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Signup,
    ProfileSetup,
    Home,
    Board,
    Upload,
    MyPage,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "로그인",
            Screen::Signup => "회원가입",
            Screen::ProfileSetup => "프로필 설정",
            Screen::Home => "홈",
            Screen::Board => "족보 게시판",
            Screen::Upload => "족보 업로드",
            Screen::MyPage => "마이페이지",
        }
    }

    /// Screens reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Screen::Login | Screen::Signup | Screen::ProfileSetup)
    }
}
