//! Skincare quiz route handlers.
//!
//! The wizard state lives in the session. HTMX requests swap the step
//! fragment in place; plain form posts follow post/redirect/get back to
//! `GET /quiz`, except validation failures, which re-render with 422.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{debug, instrument};

use lumen_core::{
    AgeGroup, ClimateType, ExfoliantType, ExfoliationFrequency, MakeupFrequency, MakeupType,
    SkinGoal, SkinType, SleepHabits,
};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::quiz::{FieldErrors, FormFields, QuizAnswers, QuizError, QuizState, Step, store};
use crate::routes::HxRequest;

/// One radio or checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// A group of choices posted under one field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField {
    pub name: &'static str,
    pub legend: &'static str,
    /// Checkboxes rather than radios.
    pub multiple: bool,
    pub choices: Vec<Choice>,
    pub error: Option<String>,
}

/// Everything the step template needs.
#[derive(Debug, Clone)]
pub struct StepView {
    pub index: u8,
    pub title: &'static str,
    pub progress: u16,
    pub is_splash: bool,
    pub is_summary: bool,
    pub can_go_back: bool,
    pub fields: Vec<ChoiceField>,
    pub summary: Vec<(&'static str, String)>,
    pub focus: Vec<&'static str>,
}

/// Where pre-checked values come from.
enum Checked<'a> {
    Answers(&'a QuizAnswers),
    Posted(&'a FormFields),
}

impl Checked<'_> {
    fn is_checked(&self, name: &str, value: &str) -> bool {
        match self {
            Self::Posted(fields) => fields.all(name).any(|v| v == value),
            Self::Answers(answers) => answered(answers, name).contains(&value),
        }
    }
}

/// Stored answer(s) for a field, in wire spelling.
fn answered(answers: &QuizAnswers, name: &str) -> Vec<&'static str> {
    fn one<T: Copy>(value: Option<T>, f: fn(&T) -> &'static str) -> Vec<&'static str> {
        value.as_ref().map(f).into_iter().collect()
    }
    fn many<T>(values: &[T], f: fn(&T) -> &'static str) -> Vec<&'static str> {
        values.iter().map(f).collect()
    }

    match name {
        "skin_type" => one(answers.skin_type, SkinType::as_str),
        "exfoliation_frequency" => one(answers.exfoliation_frequency, ExfoliationFrequency::as_str),
        "exfoliants" => many(&answers.exfoliants, ExfoliantType::as_str),
        "age_group" => one(answers.age_group, AgeGroup::as_str),
        "climate_type" => one(answers.climate_type, ClimateType::as_str),
        "sleep_habits" => one(answers.sleep_habits, SleepHabits::as_str),
        "wears_makeup" => one(answers.wears_makeup, |w| if *w { "true" } else { "false" }),
        "makeup_types" => many(&answers.makeup_types, MakeupType::as_str),
        "makeup_frequency" => one(answers.makeup_frequency, MakeupFrequency::as_str),
        "skin_goals" => many(&answers.skin_goals, SkinGoal::as_str),
        _ => Vec::new(),
    }
}

fn field(
    name: &'static str,
    legend: &'static str,
    multiple: bool,
    options: impl IntoIterator<Item = (&'static str, &'static str)>,
    checked: &Checked<'_>,
    errors: Option<&FieldErrors>,
) -> ChoiceField {
    ChoiceField {
        name,
        legend,
        multiple,
        choices: options
            .into_iter()
            .map(|(value, label)| Choice {
                value,
                label,
                checked: checked.is_checked(name, value),
            })
            .collect(),
        error: errors.and_then(|e| e.get(name)).map(str::to_string),
    }
}

macro_rules! options {
    ($ty:ty) => {
        <$ty>::ALL.iter().map(|o| (o.as_str(), o.label()))
    };
}

fn step_fields(step: Step, checked: &Checked<'_>, errors: Option<&FieldErrors>) -> Vec<ChoiceField> {
    match step {
        Step::Splash | Step::Summary => Vec::new(),
        Step::SkinType => vec![field(
            "skin_type",
            "Skin type",
            false,
            options!(SkinType),
            checked,
            errors,
        )],
        Step::Exfoliation => vec![
            field(
                "exfoliation_frequency",
                "How often do you exfoliate?",
                false,
                options!(ExfoliationFrequency),
                checked,
                errors,
            ),
            field(
                "exfoliants",
                "Which exfoliants do you use?",
                true,
                options!(ExfoliantType),
                checked,
                errors,
            ),
        ],
        Step::AgeGroup => vec![field(
            "age_group",
            "Age group",
            false,
            options!(AgeGroup),
            checked,
            errors,
        )],
        Step::Environment => vec![field(
            "climate_type",
            "Environment",
            false,
            options!(ClimateType),
            checked,
            errors,
        )],
        Step::Sleep => vec![field(
            "sleep_habits",
            "Sleep",
            false,
            options!(SleepHabits),
            checked,
            errors,
        )],
        Step::Makeup => vec![
            field(
                "wears_makeup",
                "Do you wear makeup?",
                false,
                [("true", "Yes"), ("false", "No")],
                checked,
                errors,
            ),
            field(
                "makeup_types",
                "What do you wear?",
                true,
                options!(MakeupType),
                checked,
                errors,
            ),
            field(
                "makeup_frequency",
                "How often?",
                false,
                options!(MakeupFrequency),
                checked,
                errors,
            ),
        ],
        Step::Goals => vec![field(
            "skin_goals",
            "Skin goals",
            true,
            options!(SkinGoal),
            checked,
            errors,
        )],
    }
}

impl StepView {
    fn build(quiz: &QuizState, posted: Option<(&FormFields, &FieldErrors)>) -> Self {
        let step = quiz.current();
        let answers = quiz.answers();
        let fields = match posted {
            Some((fields, errors)) => step_fields(step, &Checked::Posted(fields), Some(errors)),
            None => step_fields(step, &Checked::Answers(answers), None),
        };
        let is_summary = step == Step::Summary;

        Self {
            index: step.index(),
            title: step.title(),
            progress: step.progress_percent(),
            is_splash: step == Step::Splash,
            is_summary,
            can_go_back: step != Step::Splash,
            fields,
            summary: if is_summary {
                answers.summary_rows()
            } else {
                Vec::new()
            },
            focus: if is_summary {
                answers
                    .recommended_focus()
                    .iter()
                    .map(|f| f.label())
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}

/// Full quiz page.
#[derive(Template, WebTemplate)]
#[template(path = "quiz/show.html")]
pub struct QuizPageTemplate {
    pub nonce: String,
    pub step: StepView,
}

/// Step fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "quiz/step.html")]
pub struct QuizStepTemplate {
    pub step: StepView,
}

fn render(htmx: bool, nonce: String, status: StatusCode, step: StepView) -> Response {
    if htmx {
        (status, QuizStepTemplate { step }).into_response()
    } else {
        (status, QuizPageTemplate { nonce, step }).into_response()
    }
}

/// After a state change: fragment for HTMX, redirect otherwise.
fn advance(htmx: bool, quiz: &QuizState) -> Response {
    if htmx {
        QuizStepTemplate {
            step: StepView::build(quiz, None),
        }
        .into_response()
    } else {
        Redirect::to("/quiz").into_response()
    }
}

/// Show the current step.
#[instrument(skip(session, nonce))]
pub async fn show(session: Session, CspNonce(nonce): CspNonce) -> Result<impl IntoResponse> {
    let quiz = store::load(&session).await?;
    Ok(QuizPageTemplate {
        nonce,
        step: StepView::build(&quiz, None),
    })
}

/// Submit the current step.
#[instrument(skip(session, nonce, pairs))]
pub async fn submit(
    session: Session,
    HxRequest(htmx): HxRequest,
    CspNonce(nonce): CspNonce,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let fields = FormFields::from(pairs);
    let posted = fields
        .first("step")
        .and_then(|s| s.parse::<u8>().ok())
        .ok_or_else(|| AppError::BadRequest("missing step".to_string()))?;

    let mut quiz = store::load(&session).await?;
    match quiz.submit(posted, &fields) {
        Ok(next) => {
            let (from, to) = (posted.to_string(), next.index().to_string());
            add_breadcrumb(
                "quiz",
                "Step submitted",
                &[("step", from.as_str()), ("next", to.as_str())],
            );
            store::save(&session, &quiz).await?;
            Ok(advance(htmx, &quiz))
        }
        Err(QuizError::StaleStep { posted, current }) => {
            debug!(posted, current = current.index(), "Stale quiz step posted");
            Ok(render(htmx, nonce, StatusCode::OK, StepView::build(&quiz, None)))
        }
        Err(QuizError::Invalid(errors)) => Ok(render(
            htmx,
            nonce,
            StatusCode::UNPROCESSABLE_ENTITY,
            StepView::build(&quiz, Some((&fields, &errors))),
        )),
    }
}

/// Go back one step.
#[instrument(skip(session))]
pub async fn back(session: Session, HxRequest(htmx): HxRequest) -> Result<Response> {
    let mut quiz = store::load(&session).await?;
    quiz.back();
    store::save(&session, &quiz).await?;
    Ok(advance(htmx, &quiz))
}

/// Start over.
#[instrument(skip(session))]
pub async fn reset(session: Session, HxRequest(htmx): HxRequest) -> Result<Response> {
    let mut quiz = store::load(&session).await?;
    quiz.reset();
    store::clear(&session).await?;
    add_breadcrumb("quiz", "Quiz reset", &[]);
    Ok(advance(htmx, &quiz))
}
