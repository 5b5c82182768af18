use dioxus::prelude::*;

use ui::SessionProvider;
use views::{
    AppLayout, CreatePost, Dashboard, EditPost, Login, PinterestCallback, Settings, Signup,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/pinterest/callback")]
    PinterestCallback {},
    #[layout(AppLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/posts/new")]
        CreatePost {},
        #[route("/posts/:id/edit")]
        EditPost { id: String },
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start Tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to create session table");

    let secure = std::env::var("COOKIE_SECURE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7)
                .try_into()
                .expect("Session lifetime out of range"),
        ));

    let pinterest = api::pinterest::config::PinterestConfig::from_env();
    tracing::info!("Pinterest: {}", pinterest.mode_info().message);

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Pinspire" }
        style { {views::GLOBAL_CSS} }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Send `/` to the dashboard or the login page.
#[component]
fn Root() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();

    if !session.is_checking() || session.is_authenticated() {
        if session.is_authenticated() {
            nav.replace(Route::Dashboard {});
        } else {
            nav.replace(Route::Login {});
        }
    }
    rsx! { ui::Loader {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            style: "padding: 3rem; text-align: center;",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Root {}, "Go home" }
        }
    }
}
