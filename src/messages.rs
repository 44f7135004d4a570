//! User-facing text

pub const ASK_NEW_PASSWORD: &str = "게시글을 수정하거나 삭제할 때 사용할 비밀번호를 입력하세요.";
pub const ASK_EDIT_PASSWORD: &str = "수정하려면 비밀번호를 입력하세요.";
pub const ASK_DELETE_PASSWORD: &str = "삭제하려면 비밀번호를 입력하세요.";
pub const ASK_NEW_TITLE: &str = "새로운 제목을 입력하세요.";
pub const ASK_NEW_CONTENT: &str = "새로운 내용을 입력하세요.";
pub const CONFIRM_DELETE: &str = "정말 삭제하시겠습니까?";

pub const MISSING_FIELDS: &str = "모든 항목을 입력하세요!";
pub const WRONG_PASSWORD: &str = "비밀번호가 틀렸습니다!";
pub const POST_NOT_FOUND: &str = "게시글을 찾을 수 없습니다.";
pub const SAVE_FAILED: &str = "저장에 실패했습니다.";

pub const EDIT_BUTTON: &str = "수정";
pub const DELETE_BUTTON: &str = "삭제";
pub const CLOSE_BUTTON: &str = "닫기";
