//! 공용 시설 전기 요금을 임차인 청구서로 배분하는 계산 모듈 모음.

pub mod allocation;
pub mod calculator;
pub mod input;

pub use allocation::*;
pub use calculator::*;
pub use input::*;
