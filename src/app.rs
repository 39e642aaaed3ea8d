use leptos::*;

use crate::config;
use crate::session::{self, WorkoutSession};
use crate::sheets;
use crate::storage;
use crate::types::{ExerciseRow, StatusKind, StatusMessage, WeightUnit};

/// How long the success message stays up before the form resets.
const SUCCESS_RESET_MS: u32 = 1500;

/// Settle delay before re-rendering after an orientation change.
const ORIENTATION_SETTLE_MS: u32 = 100;

#[component]
pub fn App() -> impl IntoView {
    let initial_day = storage::load_saved_day().unwrap_or(1);
    let session = create_rw_signal(WorkoutSession::new(initial_day));

    let (status, set_status) = create_signal(Option::<StatusMessage>::None);
    let (finish_enabled, set_finish_enabled) = create_signal(true);
    // Bumped whenever the exercise list must be rebuilt from scratch
    // (day switch, post-submit reset, orientation change).
    let (epoch, set_epoch) = create_signal(0u32);

    let current_day = create_memo(move |_| session.with(|s| s.current_day()));

    // Day switch: replace the whole set map, commit the day, clear
    // transient UI state.
    let select_day = Callback::new(move |day: u8| {
        session.update(|s| {
            s.set_current_day(day);
            s.reset_workout_data();
            s.initialize_workout_data();
        });
        storage::save_current_day(session.with_untracked(|s| s.current_day()));
        set_status.set(None);
        set_finish_enabled.set(true);
        set_epoch.update(|e| *e += 1);
    });

    let on_finish = move |_| {
        let payload = session.with_untracked(|s| s.prepare_sheet_data());
        set_status.set(Some(StatusMessage::loading("Enviando...")));
        set_finish_enabled.set(false);

        spawn_local(async move {
            match sheets::send_workout(&payload).await {
                Ok(_) => {
                    set_status.set(Some(StatusMessage::success(
                        "Entrenamiento guardado exitosamente",
                    )));
                    gloo_timers::future::TimeoutFuture::new(SUCCESS_RESET_MS).await;
                    // Same day, fresh form; the user picks the next day.
                    session.update(|s| {
                        s.reset_workout_data();
                        s.initialize_workout_data();
                    });
                    set_epoch.update(|e| *e += 1);
                    set_status.set(None);
                    set_finish_enabled.set(true);
                }
                Err(e) => {
                    set_status.set(Some(StatusMessage::error(format!("Error: {}", e))));
                    set_finish_enabled.set(true);
                }
            }
        });
    };

    // Rebuild the list after rotation so the layout recovers; the
    // store itself is untouched.
    let _ = window_event_listener(ev::Custom::new("orientationchange"), move |_: web_sys::Event| {
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(ORIENTATION_SETTLE_MS).await;
            set_epoch.update(|e| *e += 1);
        });
    });

    view! {
        <div class="container">
            <header class="header">
                <h1>"4x Full Body"</h1>
                <div class="current-day" id="currentDay">
                    {move || session::day_label(current_day.get())}
                </div>
            </header>

            <DaySelector current_day=current_day on_select=select_day />
            <ProgressBar session=session />
            <ExerciseList session=session epoch=epoch />

            <button
                class="finish-btn"
                id="finishBtn"
                disabled=move || !finish_enabled.get()
                on:click=on_finish
            >
                "Terminar Entrenamiento"
            </button>

            <StatusLine status=status />
        </div>
    }
}

/// One button per day; exactly one is active. What a day click means
/// is the caller's policy.
#[component]
fn DaySelector(current_day: Memo<u8>, on_select: Callback<u8>) -> impl IntoView {
    view! {
        <div class="day-buttons">
            {(1..=config::TOTAL_DAYS)
                .map(|day| {
                    view! {
                        <button
                            class="day-btn"
                            class:active=move || current_day.get() == day
                            on:click=move |_| on_select.call(day)
                        >
                            {session::day_label(day)}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Completed/total counters plus the proportional fill.
#[component]
fn ProgressBar(session: RwSignal<WorkoutSession>) -> impl IntoView {
    let progress = create_memo(move |_| session.with(|s| s.progress()));
    view! {
        <div class="progress-section">
            <div class="progress-info">
                <span id="completedSets">{move || progress.get().completed}</span>
                "/"
                <span id="totalSets">{move || progress.get().total}</span>
                " series"
            </div>
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    id="progressFill"
                    style:width=move || format!("{}%", progress.get().percentage)
                ></div>
            </div>
        </div>
    }
}

#[component]
fn ExerciseList(session: RwSignal<WorkoutSession>, epoch: ReadSignal<u32>) -> impl IntoView {
    view! {
        <div class="exercises" id="exercisesContainer">
            {move || {
                epoch.get();
                session
                    .with_untracked(|s| s.view_model())
                    .into_iter()
                    .map(|row| view! { <ExerciseCard session=session row=row /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ExerciseCard(session: RwSignal<WorkoutSession>, row: ExerciseRow) -> impl IntoView {
    let exercise_index = row.exercise_index;
    view! {
        <div class="exercise">
            <div class="exercise-title">{row.name}</div>
            <div class="sets-container">
                {row.sets
                    .into_iter()
                    .map(|set| {
                        let set_number = set.set_number;
                        let (completed, set_completed) = create_signal(set.completed);

                        let on_weight = move |ev: web_sys::Event| {
                            session.update(|s| {
                                s.update_set_weight(
                                    exercise_index,
                                    set_number,
                                    event_target_value(&ev),
                                );
                            });
                        };
                        let on_unit = move |ev: web_sys::Event| {
                            if let Some(unit) = WeightUnit::parse(&event_target_value(&ev)) {
                                session.update(|s| {
                                    s.update_set_unit(exercise_index, set_number, unit);
                                });
                            }
                        };
                        let on_toggle = move |_: web_sys::Event| {
                            let mut toggled = None;
                            session.update(|s| {
                                toggled = s.toggle_set_completed(exercise_index, set_number);
                            });
                            if let Some(now_completed) = toggled {
                                set_completed.set(now_completed);
                            }
                        };

                        view! {
                            <div class="set" class:completed=move || completed.get()>
                                <div class="set-number">{format!("S{}", set_number)}</div>
                                <div class="set-inputs">
                                    <input
                                        type="number"
                                        step="0.5"
                                        placeholder="Peso"
                                        class="weight-input"
                                        prop:value=set.weight.clone()
                                        on:change=on_weight
                                    />
                                    <select class="unit-select" on:change=on_unit>
                                        {config::UNITS
                                            .iter()
                                            .map(|unit| {
                                                view! {
                                                    <option
                                                        value=unit.as_str()
                                                        selected={*unit == set.unit}
                                                    >
                                                        {unit.as_str()}
                                                    </option>
                                                }
                                            })
                                            .collect_view()}
                                    </select>
                                    <input
                                        type="checkbox"
                                        class="set-checkbox"
                                        prop:checked=set.completed
                                        on:change=on_toggle
                                    />
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Transient status line; loading gets a spinner in front of the text.
#[component]
fn StatusLine(status: ReadSignal<Option<StatusMessage>>) -> impl IntoView {
    view! {
        {move || match status.get() {
            None => view! { <div class="status-message" id="statusMessage"></div> }.into_view(),
            Some(message) => {
                let class = format!("status-message {}", message.kind.class_name());
                if message.kind == StatusKind::Loading {
                    view! {
                        <div class=class id="statusMessage">
                            <span class="spinner"></span>
                            {message.text}
                        </div>
                    }
                    .into_view()
                } else {
                    view! { <div class=class id="statusMessage">{message.text}</div> }.into_view()
                }
            }
        }}
    }
}
