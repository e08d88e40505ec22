// 統合テスト
// 1つのテストバイナリにまとめる

mod fixtures;
mod test_collaborators;
mod test_dispatch;
