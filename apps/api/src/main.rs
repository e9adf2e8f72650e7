//! # Todo API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `TODO_API_HOST` | `0.0.0.0` | バインドアドレス |
//! | `TODO_API_PORT` | `3000` | ポート番号 |
//! | `DATABASE_URL` | `sqlite://todo.db` | SQLite 接続 URL |
//! | `LOG_FORMAT` | `pretty` | ログ出力形式（`json` / `pretty`） |
//! | `RUST_LOG` | `info,todo_api=debug,todo_infra=debug` | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todo-api
//!
//! # 本番環境
//! LOG_FORMAT=json DATABASE_URL=sqlite:///var/lib/todo/todo.db cargo run -p todo-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use todo_api::{
   app_builder::build_app,
   config::ApiConfig,
   handler::{ReadinessState, TodoState},
   usecase::TodoUseCaseImpl,
};
use todo_domain::clock::SystemClock;
use todo_infra::{db, repository::SqliteTodoRepository};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Todo API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("todo-api");
   init_tracing(&tracing_config);
   let _tracing_guard =
      tracing::info_span!("app", service = %tracing_config.service_name).entered();

   // 設定読み込み
   let config = ApiConfig::from_env()?;

   tracing::info!(
      "Todo API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成し、スキーマを用意する
   let pool = db::create_pool(&config.database_url).await?;
   db::ensure_schema(&pool).await?;
   tracing::info!("データベースに接続しました");

   // 依存コンポーネントを初期化
   let usecase = TodoUseCaseImpl::new(
      Arc::new(SqliteTodoRepository::new(pool.clone())),
      Arc::new(SystemClock),
   );
   let todo_state = Arc::new(TodoState { usecase });
   let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

   let app = build_app(todo_state, readiness_state);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Todo API サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   pool.close().await;
   tracing::info!("Todo API サーバーを停止しました");

   Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンを開始します");
}
