/// Popup UI for the Tube Sentiment extension

use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use patternfly_yew::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::predict_batch;
use crate::comment::{Comment, Prediction, Sentiment};
use crate::export::{build_csv, EXPORT_FILENAME};
use crate::messaging::{is_watch_page, CommentsResponse, Message};
use crate::stats::SentimentCounts;
use crate::theme::{self, Theme};

/// Bound on how long the popup waits for the content script to answer.
const PULL_TIMEOUT_MS: u32 = 8_000;
/// Tallest chart bar, in pixels.
const CHART_BAR_MAX_HEIGHT: u32 = 120;

const MSG_NO_TAB: &str = "Aucun onglet actif trouvé.";
const MSG_WRONG_PAGE: &str = "Ouvrez une page de vidéo YouTube.";
const MSG_COMM_FAILURE: &str = "Impossible d'extraire les commentaires. Rechargez la page.";
const MSG_NO_COMMENTS: &str = "Aucun commentaire trouvé sur cette page.";
const MSG_TIMEOUT: &str = "Délai d'attente dépassé. Rechargez la page.";

// Import JS bridge functions
#[wasm_bindgen(module = "/js/popup_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    fn exportToFile(data: &str, filename: &str);
}

/// Active tab handle as delivered by the bridge.
#[derive(Debug, Deserialize)]
struct ActiveTab {
    id: i32,
    url: String,
}

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

#[derive(Clone, Copy, PartialEq)]
enum SentimentFilter {
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    fn matches(&self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(wanted) => *wanted == sentiment,
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading("Extraction des commentaires...".to_string()));
    let comments = use_state(Vec::<Comment>::new);
    let predictions = use_state(Vec::<Prediction>::new);
    let filter = use_state(|| SentimentFilter::All);
    let active_theme = use_state(theme::load);

    // On mount: apply the saved theme and pull comments from the page
    {
        let state = state.clone();
        let comments = comments.clone();
        let active_theme = active_theme.clone();

        use_effect_with((), move |_| {
            apply_theme(*active_theme);

            spawn_local(async move {
                match request_comments().await {
                    Ok(response) => {
                        log::info!(
                            "{} comments extracted from {}",
                            response.comments.len(),
                            response.video_url
                        );
                        comments.set(response.comments);
                        state.set(AppState::Idle);
                    }
                    Err(message) => {
                        state.set(AppState::Error(message));
                    }
                }
            });
            || ()
        });
    }

    // Theme toggle handler
    let on_toggle_theme = {
        let active_theme = active_theme.clone();

        Callback::from(move |_| {
            let toggled = active_theme.toggled();
            apply_theme(toggled);
            theme::save(toggled);
            active_theme.set(toggled);
        })
    };

    // Analyze handler: one batch request for all comment texts
    let on_analyze = {
        let state = state.clone();
        let comments = comments.clone();
        let predictions = predictions.clone();

        Callback::from(move |_| {
            if comments.is_empty() {
                return;
            }

            let state = state.clone();
            let predictions = predictions.clone();
            let texts: Vec<String> = comments.iter().map(|c| c.text.clone()).collect();

            state.set(AppState::Loading("Analyse en cours...".to_string()));

            spawn_local(async move {
                match predict_batch(texts).await {
                    Ok(result) => {
                        predictions.set(result);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        // Previously extracted comments stay untouched.
                        state.set(AppState::Error(format!(
                            "Erreur API : {}. Vérifiez que l'API est démarrée.",
                            e
                        )));
                    }
                }
            });
        })
    };

    // Export handler
    let on_export = {
        let comments = comments.clone();
        let predictions = predictions.clone();

        Callback::from(move |_| {
            if predictions.is_empty() {
                return;
            }
            let csv = build_csv(&comments, &predictions);
            exportToFile(&csv, EXPORT_FILENAME);
        })
    };

    // Filter button handlers
    let on_filter = {
        let filter = filter.clone();
        move |wanted: SentimentFilter| {
            let filter = filter.clone();
            Callback::from(move |_| {
                filter.set(wanted);
            })
        }
    };

    let is_busy = matches!(*state, AppState::Loading(_));
    let has_comments = !comments.is_empty();
    let has_predictions = !predictions.is_empty();
    let counts = SentimentCounts::tally(&predictions);

    html! {
        <div class="popup-container">
            <div class="popup-header">
                <h1 class="popup-title">{"Tube Sentiment"}</h1>
                <button class="theme-toggle" onclick={on_toggle_theme}>
                    {active_theme.toggle_icon()}
                </button>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Erreur"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            // Stats section
            if has_comments {
                <div class="stats-section">
                    <div class="stat-row">
                        <span class="stat-label">{"Commentaires"}</span>
                        <span class="stat-count">{comments.len()}</span>
                    </div>
                    if has_predictions {
                        <div class="stat-row">
                            <span class="stat-positive">{format!("😊 {}", counts.positive)}</span>
                            <span class="stat-neutral">{format!("😐 {}", counts.neutral)}</span>
                            <span class="stat-negative">{format!("😞 {}", counts.negative)}</span>
                        </div>
                        {render_chart(&counts, *active_theme)}
                    }
                </div>
            }

            // Controls section
            if has_comments {
                <div class="controls-section">
                    <Button onclick={on_analyze} disabled={is_busy} block={true}>
                        {"🔍 Analyser les sentiments"}
                    </Button>
                    if has_predictions {
                        <div class="filter-buttons">
                            {filter_button("Tous", SentimentFilter::All, *filter, &on_filter)}
                            {filter_button("😊", SentimentFilter::Only(Sentiment::Positive), *filter, &on_filter)}
                            {filter_button("😐", SentimentFilter::Only(Sentiment::Neutral), *filter, &on_filter)}
                            {filter_button("😞", SentimentFilter::Only(Sentiment::Negative), *filter, &on_filter)}
                        </div>
                        <Button onclick={on_export} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                            {"📥 Exporter en CSV"}
                        </Button>
                    }
                </div>
            }

            // Classified comments list
            if has_predictions {
                <div class="comments-list">
                    {for predictions.iter().zip(comments.iter()).map(|(pred, comment)| {
                        let visible = filter.matches(pred.sentiment);
                        html! {
                            <div
                                key={comment.id.clone()}
                                class={classes!("comment-item", pred.sentiment.css_class())}
                                style={if visible { "display: block;" } else { "display: none;" }}
                            >
                                <div class="comment-text">{&comment.text}</div>
                                <div class="comment-meta">
                                    <span>{format!("{} {}", pred.sentiment.emoji(), pred.confidence_percent())}</span>
                                    <span>{&comment.author}</span>
                                </div>
                            </div>
                        }
                    })}
                </div>
            }
        </div>
    }
}

fn filter_button(
    label: &'static str,
    wanted: SentimentFilter,
    current: SentimentFilter,
    on_filter: &impl Fn(SentimentFilter) -> Callback<MouseEvent>,
) -> Html {
    let class = if wanted == current {
        "filter-btn active"
    } else {
        "filter-btn"
    };

    html! {
        <button class={class} onclick={on_filter(wanted)}>
            {label}
        </button>
    }
}

/// Three fixed-color bars, heights proportional to the largest count.
fn render_chart(counts: &SentimentCounts, active_theme: Theme) -> Html {
    let heights = counts.bar_heights(CHART_BAR_MAX_HEIGHT);
    let label_color = if active_theme.is_dark() { "#e8eaed" } else { "#202124" };
    let bars = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    html! {
        <div class="chart" style={format!("height: {}px;", CHART_BAR_MAX_HEIGHT + 20)}>
            {for bars.iter().zip(heights.iter()).map(|(sentiment, height)| html! {
                <div class="chart-bar-wrap">
                    <span class="chart-bar-value" style={format!("color: {};", label_color)}>
                        {counts.get(*sentiment)}
                    </span>
                    <div
                        class="chart-bar"
                        style={format!(
                            "height: {}px; background-color: {};",
                            height,
                            sentiment.chart_color()
                        )}
                    ></div>
                </div>
            })}
        </div>
    }
}

// Helper functions

fn apply_theme(active_theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.body())
    else {
        return;
    };

    let class_list = body.class_list();
    let result = if active_theme.is_dark() {
        class_list.add_1("dark-mode")
    } else {
        class_list.remove_1("dark-mode")
    };
    if result.is_err() {
        log::warn!("failed to apply theme class");
    }
}

/// Pull the visible comments from the content script in the active tab.
///
/// Every failure mode maps to its own terminal user-visible message; a
/// response arriving after the timeout bound is dropped.
async fn request_comments() -> Result<CommentsResponse, String> {
    let tab_js = queryActiveTab()
        .await
        .map_err(|e| {
            log::warn!("tab query failed: {:?}", e);
            MSG_NO_TAB.to_string()
        })?;

    if tab_js.is_null() || tab_js.is_undefined() {
        return Err(MSG_NO_TAB.to_string());
    }

    let tab: ActiveTab =
        serde_wasm_bindgen::from_value(tab_js).map_err(|_| MSG_NO_TAB.to_string())?;

    if !is_watch_page(&tab.url) {
        return Err(MSG_WRONG_PAGE.to_string());
    }

    let request = serde_wasm_bindgen::to_value(&Message::GetComments)
        .map_err(|_| MSG_COMM_FAILURE.to_string())?;

    let pull = Box::pin(sendTabMessage(tab.id, request));
    let timeout = Box::pin(TimeoutFuture::new(PULL_TIMEOUT_MS));

    let response_js = match select(pull, timeout).await {
        Either::Left((result, _)) => result.map_err(|e| {
            log::warn!("message delivery failed: {:?}", e);
            MSG_COMM_FAILURE.to_string()
        })?,
        Either::Right(_) => return Err(MSG_TIMEOUT.to_string()),
    };

    let response: CommentsResponse = serde_wasm_bindgen::from_value(response_js)
        .map_err(|_| MSG_COMM_FAILURE.to_string())?;

    if !response.success {
        return Err(MSG_COMM_FAILURE.to_string());
    }
    if response.comments.is_empty() {
        return Err(MSG_NO_COMMENTS.to_string());
    }

    Ok(response)
}
