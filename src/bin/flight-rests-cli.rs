#![forbid(unsafe_code)]
use anyhow::{bail, ensure, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flight_rests::{
    adjust::{adjust_begin, instant_for_time, EndInput},
    config::{Defaults, PERIOD_RANGE, USER_RANGE},
    engine::{compute_rest_plan, validate, InputStatus},
    history::RequestLog,
    io,
    model::{CrewRole, RequestId, RestRequest},
    render::{summary_line, PlanRenderer, TextPlanRenderer},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des repos en vol
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'historique
    #[arg(long, global = true, default_value = "rest-history.json")]
    history: String,

    /// Fichier JSON de sélections par défaut
    #[arg(long, global = true)]
    defaults: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer et afficher un plan de repos
    Plan {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        /// Ne pas enregistrer la demande dans l'historique
        #[arg(long)]
        no_save: bool,
    },

    /// Vérifier la faisabilité d'une demande
    Validate {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Gérer l'historique des demandes
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Lister les demandes récentes
    List,
    /// Supprimer une demande
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Vider l'historique
    Clear,
    /// Recalculer le plan d'une demande enregistrée
    Replay {
        #[arg(long)]
        id: String,
        /// Fuseau d'affichage (par défaut celui de la demande)
        #[arg(long)]
        tz: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    Flight,
    Cabin,
}

impl From<RoleArg> for CrewRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Flight => CrewRole::FlightCrew,
            RoleArg::Cabin => CrewRole::CabinCrew,
        }
    }
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Début des repos (HH:MM, heure locale du fuseau `--tz`)
    #[arg(long)]
    begin: String,
    /// Fin des repos, pilotes (HH:MM)
    #[arg(long)]
    end: Option<String>,
    /// Atterrissage, PNC (HH:MM)
    #[arg(long)]
    landing: Option<String>,
    /// Durée du service PNC (none, 1h00 ... 3h00)
    #[arg(long)]
    service: Option<String>,
    #[arg(long, value_enum, default_value_t = RoleArg::Flight)]
    role: RoleArg,
    #[arg(long)]
    users: Option<u32>,
    #[arg(long)]
    periods: Option<u32>,
    /// Pause minimale (none, 5m, 10m, 15m)
    #[arg(long)]
    min_break: Option<String>,
    /// Allonger les pauses avec les unités restantes
    #[arg(long)]
    optimise: bool,
    /// Fuseau IANA de saisie et d'affichage
    #[arg(long, default_value = "UTC")]
    tz: String,
    /// Instant de référence (RFC3339), par défaut maintenant
    #[arg(long)]
    now: Option<String>,
}

impl RequestArgs {
    fn build(&self, defaults: &Defaults) -> Result<RestRequest> {
        let tz = io::parse_time_zone(&self.tz)?;
        let now: DateTime<Utc> = match &self.now {
            Some(raw) => raw.parse().with_context(|| format!("invalid --now {raw}"))?,
            None => Utc::now(),
        };
        let local_now = now.with_timezone(&tz);

        let raw_begin = local_instant(&self.begin, &local_now)?;
        let begin = adjust_begin(raw_begin, &local_now);

        let role = CrewRole::from(self.role);
        let end_input = match role {
            CrewRole::FlightCrew => {
                let Some(end) = &self.end else {
                    bail!("--end is required for flight crew");
                };
                EndInput::FlightCrew {
                    raw_end: local_instant(end, &local_now)?,
                }
            }
            CrewRole::CabinCrew => {
                let Some(landing) = &self.landing else {
                    bail!("--landing is required for cabin crew");
                };
                let service = self.service.as_deref().unwrap_or(&defaults.service);
                EndInput::CabinCrew {
                    raw_landing: local_instant(landing, &local_now)?,
                    service_seconds: io::parse_service_label(service)?,
                }
            }
        };
        let end = end_input.resolve(&begin);

        let minimum_break = match &self.min_break {
            Some(raw) => io::parse_break_label(raw)?,
            None => defaults.minimum_break_units,
        };

        let users = self.users.unwrap_or(defaults.users);
        let periods = self.periods.unwrap_or(defaults.periods);
        ensure!(
            PERIOD_RANGE.contains(&periods),
            "--periods must be within {PERIOD_RANGE:?}"
        );
        // le PNC a autant de groupes que de repos
        if role == CrewRole::FlightCrew {
            ensure!(
                USER_RANGE.contains(&users),
                "--users must be within {USER_RANGE:?}"
            );
        }

        Ok(RestRequest::new(
            begin.with_timezone(&Utc),
            end.with_timezone(&Utc),
            role,
            tz,
            now,
        )
        .with_users(users)
        .with_periods(periods)
        .with_minimum_break(minimum_break)
        .with_optimised_breaks(self.optimise || defaults.optimise_breaks))
    }
}

fn local_instant<Tz: chrono::TimeZone>(raw: &str, now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let time = io::parse_time_of_day(raw)?;
    instant_for_time(time, now)
        .with_context(|| format!("local time {raw} does not exist on that day"))
}

fn report_invalid(status: InputStatus) -> i32 {
    eprintln!("Invalid request: {status}");
    // Code 2 = demande non faisable
    2
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let defaults = match &cli.defaults {
        Some(path) => Defaults::load_from_file(path)?,
        None => Defaults::default(),
    };

    let storage = JsonStorage::open(&cli.history)?;
    let mut log = RequestLog::with_limits(defaults.max_entries, defaults.retention_months)
        .restore(storage.load()?, Utc::now());

    let code = match cli.cmd {
        Commands::Plan {
            request,
            out_csv,
            out_json,
            no_save,
        } => {
            let request = request.build(&defaults)?;
            let status = validate(&request);
            if !status.is_valid() {
                report_invalid(status)
            } else {
                let plan = compute_rest_plan(&request);
                print!("{}", TextPlanRenderer.render(&plan, request.time_zone));
                if let Some(path) = out_json {
                    io::export_plan_json(path, &plan)?;
                }
                if let Some(path) = out_csv {
                    io::export_plan_csv(path, &plan)?;
                }
                if !no_save {
                    let created = request.creation_instant;
                    log.add_request(request, created);
                    storage.save(log.requests())?;
                }
                0
            }
        }
        Commands::Validate { request } => {
            let request = request.build(&defaults)?;
            match validate(&request) {
                InputStatus::Valid => {
                    println!("OK: valid");
                    0
                }
                status => report_invalid(status),
            }
        }
        Commands::History { action } => match action {
            HistoryAction::List => {
                if log.is_empty() {
                    println!("No recent requests");
                }
                for request in log.requests() {
                    println!("{}", summary_line(request));
                }
                0
            }
            HistoryAction::Remove { id } => {
                let removed = log.remove_request(&RequestId::new(id))?;
                storage.save(log.requests())?;
                println!("Removed {}", removed.id.as_str());
                0
            }
            HistoryAction::Clear => {
                log.clear();
                storage.save(log.requests())?;
                println!("History cleared");
                0
            }
            HistoryAction::Replay { id, tz } => {
                let request = log
                    .find(&RequestId::new(&id))
                    .ok_or_else(|| anyhow::anyhow!("unknown request: {}", id))?;
                let tz = match tz {
                    Some(raw) => io::parse_time_zone(&raw)?,
                    None => request.time_zone,
                };
                let status = validate(request);
                if !status.is_valid() {
                    report_invalid(status)
                } else {
                    print!("{}", TextPlanRenderer.render(&compute_rest_plan(request), tz));
                    0
                }
            }
        },
    };

    std::process::exit(code);
}
