use anyhow::Result;
use exam_vault::{logger, App, Config};

/// 用法: exam_vault [--sign-up] [config.toml] [搜索词]
#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let sign_up = args.first().is_some_and(|arg| arg == "--sign-up");
    if sign_up {
        args.remove(0);
    }

    // 加载配置
    let config = match args.first() {
        Some(path) if path.ends_with(".toml") => {
            let path = args.remove(0);
            Config::load(path)?
        }
        _ => Config::from_env()?,
    };

    // 初始化日志
    logger::init_with_level(&config.log_level);

    let query = args.first().map(String::as_str);

    // 初始化并运行应用
    let app = if sign_up {
        App::register(config).await?
    } else {
        App::initialize(config).await?
    };
    app.run(query).await?;

    Ok(())
}
