//! # Observability 基盤
//!
//! トレーシング初期化、ログ出力形式の設定、Request ID の生成を提供する。
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応する。

/// ログ出力形式を指定する環境変数
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 イベント 1 行の JSON
   Json,
   /// 端末向けの整形済みテキスト
   #[default]
   Pretty,
}

impl LogFormat {
   /// `json` / `pretty` を大文字小文字を区別せずに解釈する
   pub fn parse(value: &str) -> Option<Self> {
      let value = value.trim();
      if value.eq_ignore_ascii_case("json") {
         Some(Self::Json)
      } else if value.eq_ignore_ascii_case("pretty") {
         Some(Self::Pretty)
      } else {
         None
      }
   }

   /// 環境変数 `LOG_FORMAT` から読み取る
   pub fn from_env() -> Self {
      Self::from_lookup(|name| std::env::var(name).ok())
   }

   /// 未設定なら既定値、解釈できない値なら警告を出して既定値を使う
   ///
   /// subscriber の初期化前に呼ばれるため、警告は stderr に直接書く。
   fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
      let Some(raw) = lookup(LOG_FORMAT_ENV) else {
         return Self::default();
      };

      Self::parse(&raw).unwrap_or_else(|| {
         eprintln!("{LOG_FORMAT_ENV}={raw:?} は不明な値です。pretty で出力します");
         Self::default()
      })
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// ルートスパンの `service` フィールド
   pub service_name: String,
   pub log_format:   LogFormat,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
      }
   }

   /// ログ形式のみ環境変数から読み取る
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::new(service_name, LogFormat::from_env())
   }
}

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,todo_api=debug,todo_infra=debug";

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は [`DEFAULT_LOG_FILTER`] を使用する。
///
/// JSON モードでは `timestamp`, `level`, `target`, `message` がトップレベルに出力される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_target(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(tracing_error::ErrorLayer::default())
      .with(fmt_layer)
      .init();
}

/// Request ID を UUID v7 で生成する `MakeRequestId` 実装
///
/// `SetRequestIdLayer` と組み合わせて使用する。クライアントが
/// `x-request-id` を送ってきた場合はそちらが優先される（tower-http の仕様）。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(
      &mut self,
      _request: &http::Request<B>,
   ) -> Option<tower_http::request_id::RequestId> {
      let id = uuid::Uuid::now_v7().to_string();
      http::HeaderValue::from_str(&id)
         .ok()
         .map(tower_http::request_id::RequestId::new)
   }
}

/// リクエストスパンを作成する（`TraceLayer::make_span_with` 用）
///
/// `SetRequestIdLayer` が付与した `x-request-id` をスパンに含める。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get("x-request-id")
      .and_then(|v| v.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}
