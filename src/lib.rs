//! WMS 기능 정의서 메시지 카탈로그 번역기.
//! 한국어 카탈로그를 기준으로 영어/베트남어 카탈로그의 빈 항목을 채운다.

pub mod app;
pub mod catalog;
pub mod config;
pub mod feature;
pub mod i18n;
pub mod merge;
pub mod terms;
pub mod translate;
pub mod ui_cli;
