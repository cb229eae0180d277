use tracing::level_filters::LevelFilter;

/// `-v` 반복 횟수를 로그 레벨로 바꾼다. 기본은 경고 이상만 출력한다.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// 표준 에러로 간결한 로그를 출력하도록 구독자를 설치한다. 실행 파일마다 한 번만 호출한다.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
