use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use tracing::{error, info};

use crate::chart::{BridgeSurface, ChartAdapter, ChartCommands, ViewMode};
use crate::core::activity::ActivityLog;
use crate::core::aggregate::Granularity;
use crate::core::config::StatsConfig;
use crate::core::error::StatsError;
use crate::core::theme::ThemeHandle;
use crate::stats::{StatsCommand, StatsController};
use crate::t;

type SenderSlot = Rc<RefCell<Option<UnboundedSender<StatsCommand>>>>;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready { rides: usize },
    Failed(String),
}

#[component]
pub fn Stats() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let config = try_use_context::<StatsConfig>().unwrap_or_default();
    let theme = use_context::<ThemeHandle>();

    let load_state = use_signal(|| LoadState::Loading);
    let active = use_signal(|| config.default_granularity);
    let render_error = use_signal(|| Option::<String>::None);

    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));
    let commands = use_hook(|| chart_commands(sender_slot.clone()));

    let coroutine = {
        let config = config.clone();
        let theme = theme.clone();
        let commands = commands.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<StatsCommand>| {
            let config = config.clone();
            let palette = theme.palette();
            let commands = commands.clone();
            let mut load_state = load_state;
            let mut active = active;
            let render_error = render_error;

            async move {
                let mut log = ActivityLog::new(config.activity_kind.clone())
                    .with_timeout(config.request_timeout());
                if let Err(err) = log.load(&config.source()).await {
                    error!(%err, "activity feed failed to load");
                    load_state.set(LoadState::Failed(err.to_string()));
                    return;
                }

                let rides = log.len();
                let mut adapter = ChartAdapter::new(BridgeSurface::new(&config.canvas_id), commands)
                    .with_font_family(config.font_family.clone());
                adapter.set_palette(palette);
                let view = ViewMode::for_granularity(config.default_granularity);
                let mut controller = StatsController::new(log.into_records(), adapter, view);

                load_state.set(LoadState::Ready { rides });
                info!(rides, granularity = %view.granularity, "statistics ready");
                report(controller.update(None), render_error);

                while let Some(command) = rx.next().await {
                    if let StatsCommand::SetGranularity(granularity) = command {
                        active.set(granularity);
                    }
                    report(controller.handle(command), render_error);
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(coroutine.tx());

    let subscription = use_hook({
        let sender_slot = sender_slot.clone();
        let theme = theme.clone();
        move || {
            theme.subscribe(move |mode| send(&sender_slot, StatsCommand::ThemeChanged(mode)))
        }
    });
    use_drop(move || {
        theme.unsubscribe(subscription);
    });

    let state = load_state();
    let ready = matches!(state, LoadState::Ready { .. });
    let current = active();
    let (status_class, status) = match state {
        LoadState::Loading => ("stats__status", t!("stats-loading")),
        LoadState::Ready { rides } => ("stats__status", t!("stats-summary", rides = rides)),
        LoadState::Failed(err) => ("stats__error", format!("⚠️ {}", t!("stats-load-failed", error = err))),
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-stats",
            h1 { {t!("stats-title")} }
            p { {t!("stats-intro")} }

            div {
                class: "stats__controls",
                role: "group",
                aria_label: t!("stats-group-label"),
                { Granularity::ALL.iter().copied().map(|granularity| {
                    let commands = commands.clone();
                    let class = if granularity == current {
                        "button button--primary stats__granularity"
                    } else {
                        "button button--ghost stats__granularity"
                    };
                    rsx! {
                        button {
                            key: "{granularity}",
                            r#type: "button",
                            class: class,
                            disabled: !ready,
                            "data-granularity": granularity.as_str(),
                            onclick: move |_| commands.change_granularity(granularity),
                            {granularity_label(granularity)}
                        }
                    }
                })}
            }

            p { class: "{status_class}", "{status}" }

            div { class: "stats__chart",
                canvas { id: "{config.canvas_id}" }
            }

            if let Some(err) = render_error() {
                p { class: "stats__error", {format!("⚠️ {}", t!("stats-render-failed", error = err))} }
            }
        }
    }
}

fn chart_commands(sender_slot: SenderSlot) -> ChartCommands {
    let granularity_slot = sender_slot.clone();
    ChartCommands::new(
        move |year| send(&sender_slot, StatsCommand::ToggleYear(year)),
        move |granularity| send(&granularity_slot, StatsCommand::SetGranularity(granularity)),
    )
}

fn send(sender_slot: &SenderSlot, command: StatsCommand) {
    if let Some(sender) = sender_slot.borrow().as_ref() {
        let _ = sender.unbounded_send(command);
    }
}

fn report(result: Result<(), StatsError>, mut render_error: Signal<Option<String>>) {
    match result {
        Ok(()) => {
            if render_error.peek().is_some() {
                render_error.set(None);
            }
        }
        Err(err) => {
            error!(%err, "statistics render failed");
            render_error.set(Some(err.to_string()));
        }
    }
}

fn granularity_label(granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => t!("stats-group-day"),
        Granularity::Week => t!("stats-group-week"),
        Granularity::Month => t!("stats-group-month"),
    }
}
