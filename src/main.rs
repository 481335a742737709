use std::io::Write;
use std::path::PathBuf;

use buildinfo_page::build_info;
use buildinfo_page::server::{self, ServerBootstrap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        eprintln!("[PANIC] 程序异常退出");
        eprintln!("位置: {}", location);
        eprintln!("原因: {}", message);
        tracing::error!(event = "panic.raised", location = %location, reason = %message);

        std::io::stderr().flush().ok();
    }));

    let mut args = std::env::args();
    let _ = args.next();

    match args.next().as_deref() {
        Some("--version") | Some("-V") => {
            println!("buildinfo-page {}", build_info::summary());
            Ok(())
        }
        Some("export") => {
            let bootstrap = ServerBootstrap::for_cli()?;
            let report = bootstrap.export(args.next().map(PathBuf::from))?;
            for file in &report.files {
                println!("{}", file.display());
            }
            Ok(())
        }
        Some("print") => {
            let bootstrap = ServerBootstrap::for_cli()?;
            println!("{}", bootstrap.describe());
            Ok(())
        }
        None | Some("serve") => server::start_server().await,
        Some(other) => {
            eprintln!("未知命令: {}", other);
            eprintln!("用法: buildinfo-page [serve | export [dir] | print | --version]");
            std::process::exit(2);
        }
    }
}
