// 日志初始化
//
// 默认级别为 info，可通过 RUST_LOG 覆盖

use std::io::Write;

pub fn init_logger() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .try_init();

    // 宿主程序可能已经初始化过日志
    if result.is_err() {
        log::debug!("日志已初始化，跳过");
    }
}
