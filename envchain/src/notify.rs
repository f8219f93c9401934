//! Notification of run progress.
//!
//! A [`Notifier`] delivers HTML-formatted summaries, optionally with an
//! animation of the last episode, to an external sink. Delivery is best
//! effort: [`notify_parameters()`] and [`notify_episode()`] log failures and
//! never return them, so that a broken sink cannot stop a run.
use anyhow::Result;
use chrono::{DateTime, Local};
use log::{info, warn};
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

/// The number of recent episodes averaged in [`EpisodeSummary`].
pub const MEAN_WINDOW: usize = 50;

/// A sink of messages.
pub trait Notifier {
    /// Sends an HTML-formatted message, with the file of an animation if given.
    fn send(&mut self, message: &str, animation: Option<&Path>) -> Result<()>;
}

/// Writes messages to the log.
#[derive(Debug, Default)]
pub struct LogNotifier {
    n_sent: usize,
}

impl LogNotifier {
    /// The number of messages sent so far.
    pub fn n_sent(&self) -> usize {
        self.n_sent
    }
}

impl Notifier for LogNotifier {
    fn send(&mut self, message: &str, animation: Option<&Path>) -> Result<()> {
        self.n_sent += 1;
        match animation {
            Some(path) => info!("{}\n(animation: {})", message, path.display()),
            None => info!("{}", message),
        }
        Ok(())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Hyper-parameters of a run, sent once at its start.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Name of the run.
    pub run_name: String,

    /// Id of the environment.
    pub environment_id: String,

    /// Hyper-parameters as `(name, value)`, in display order.
    pub parameters: Vec<(String, String)>,

    /// Weights of reward-shaping terms as `(name, weight)`.
    pub reward_parameters: Vec<(String, f32)>,
}

impl RunSummary {
    /// A summary without parameters.
    pub fn new(run_name: impl Into<String>, environment_id: impl Into<String>) -> Self {
        Self {
            run_name: run_name.into(),
            environment_id: environment_id.into(),
            parameters: vec![],
            reward_parameters: vec![],
        }
    }

    /// Appends a hyper-parameter.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    /// Appends the weight of a reward-shaping term.
    pub fn reward_parameter(mut self, name: impl Into<String>, weight: f32) -> Self {
        self.reward_parameters.push((name.into(), weight));
        self
    }

    /// Renders the summary. Reward-shaping terms with zero weight are omitted.
    pub fn message(&self) -> String {
        let mut lines = vec![
            format!("<b>run {}</b>", escape(&self.run_name)),
            String::new(),
            format!("environment id {}", escape(&self.environment_id)),
        ];
        lines.extend(
            self.parameters
                .iter()
                .map(|(name, value)| format!("{} {}", escape(name), escape(value))),
        );
        lines.push(String::new());
        lines.extend(
            self.reward_parameters
                .iter()
                .filter(|(_, weight)| *weight != 0.0)
                .map(|(name, weight)| format!("{}={}", escape(name), weight)),
        );
        lines.join("\n")
    }
}

/// Rewards of the episodes of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardHistory {
    original: Vec<f32>,
    shaped: Vec<f32>,
}

impl RewardHistory {
    /// Appends the rewards of an episode.
    pub fn push(&mut self, original: f32, shaped: f32) {
        self.original.push(original);
        self.shaped.push(shaped);
    }

    /// The number of episodes.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Returns `true` if no episode has been recorded.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Original and shaped reward of the last episode.
    pub fn last(&self) -> Option<(f32, f32)> {
        Some((*self.original.last()?, *self.shaped.last()?))
    }

    /// Mean original and shaped reward over the last [`MEAN_WINDOW`] episodes,
    /// zero if there is none.
    pub fn running_mean(&self) -> (f32, f32) {
        (tail_mean(&self.original), tail_mean(&self.shaped))
    }
}

fn tail_mean(xs: &[f32]) -> f32 {
    let tail = &xs[xs.len().saturating_sub(MEAN_WINDOW)..];
    if tail.is_empty() {
        0.0
    } else {
        tail.iter().sum::<f32>() / tail.len() as f32
    }
}

/// Progress of a run, sent at the end of an episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Name of the run.
    pub run_name: String,

    /// Frames processed so far.
    pub total_frames: usize,

    /// Frames the run is planned for.
    pub max_frames: usize,

    /// Episodes finished so far.
    pub total_episodes: usize,

    /// Reward of the episode.
    pub episode_original_reward: f32,

    /// Shaped reward of the episode.
    pub episode_shaped_reward: f32,

    /// Mean reward over the last [`MEAN_WINDOW`] episodes.
    pub mean_original_reward: f32,

    /// Mean shaped reward over the last [`MEAN_WINDOW`] episodes.
    pub mean_shaped_reward: f32,

    /// Loss of the episode.
    pub episode_loss: f32,

    /// Time of the summary.
    pub timestamp: DateTime<Local>,
}

impl EpisodeSummary {
    /// Summarizes the last episode of `history`.
    pub fn new(run_name: impl Into<String>, history: &RewardHistory) -> Self {
        let (episode_original_reward, episode_shaped_reward) = history.last().unwrap_or_default();
        let (mean_original_reward, mean_shaped_reward) = history.running_mean();
        Self {
            run_name: run_name.into(),
            total_frames: 0,
            max_frames: 0,
            total_episodes: history.len(),
            episode_original_reward,
            episode_shaped_reward,
            mean_original_reward,
            mean_shaped_reward,
            episode_loss: 0.0,
            timestamp: Local::now(),
        }
    }

    /// Sets the frame counters.
    pub fn frames(mut self, total_frames: usize, max_frames: usize) -> Self {
        self.total_frames = total_frames;
        self.max_frames = max_frames;
        self
    }

    /// Sets the loss of the episode.
    pub fn loss(mut self, v: f32) -> Self {
        self.episode_loss = v;
        self
    }

    /// Renders the summary.
    pub fn message(&self) -> String {
        [
            format!("<b>run {}</b>", escape(&self.run_name)),
            String::new(),
            format!("frames {:8}/{}", self.total_frames, self.max_frames),
            format!("episode {:5}", self.total_episodes),
            format!(
                "episode reward {:.2} / shaped {:.2}",
                self.episode_original_reward, self.episode_shaped_reward
            ),
            format!(
                "average reward {:.2} / shaped {:.2}",
                self.mean_original_reward, self.mean_shaped_reward
            ),
            format!("loss {:.4}", self.episode_loss),
        ]
        .join("\n")
    }
}

/// The most recently modified file in `dir` with the given extension.
pub fn latest_file(dir: impl AsRef<Path>, extension: &str) -> Result<Option<PathBuf>> {
    let mut latest = None;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(true, |ext| ext != extension) {
            continue;
        }
        let modified = fs::metadata(&path)?.modified()?;
        match &latest {
            Some((t, _)) if *t >= modified => {}
            _ => latest = Some((modified, path)),
        }
    }
    Ok(latest.map(|(_, path)| path))
}

/// Sends `summary`. Returns `false` and logs a warning if the sink fails.
pub fn notify_parameters(notifier: &mut dyn Notifier, summary: &RunSummary) -> bool {
    match notifier.send(&summary.message(), None) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send parameters of {}: {:?}", summary.run_name, e);
            false
        }
    }
}

/// Sends `summary` with the latest GIF animation in `animation_dir`.
///
/// If no animation can be found, the message is sent without it. Returns
/// `false` and logs a warning if the sink fails.
pub fn notify_episode(
    notifier: &mut dyn Notifier,
    summary: &EpisodeSummary,
    animation_dir: impl AsRef<Path>,
) -> bool {
    let animation_dir = animation_dir.as_ref();
    let animation = match latest_file(animation_dir, "gif") {
        Ok(Some(path)) => Some(path),
        Ok(None) => {
            warn!("No animation in {}", animation_dir.display());
            None
        }
        Err(e) => {
            warn!("Failed to look up animation in {}: {:?}", animation_dir.display(), e);
            None
        }
    };

    match notifier.send(&summary.message(), animation.as_deref()) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                "Failed to send episode {} of {}: {:?}",
                summary.total_episodes, summary.run_name, e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempdir::TempDir;

    #[derive(Default)]
    struct Recorder {
        messages: Vec<(String, Option<PathBuf>)>,
        fail: bool,
    }

    impl Notifier for Recorder {
        fn send(&mut self, message: &str, animation: Option<&Path>) -> Result<()> {
            if self.fail {
                return Err(anyhow!("sink is down"));
            }
            self.messages
                .push((message.to_string(), animation.map(Path::to_path_buf)));
            Ok(())
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_run_summary() {
        let summary = RunSummary::new("pong-<1>", "PongNoFrameskip-v4")
            .parameter("batch size", 32)
            .parameter("gamma", 0.99)
            .reward_parameter("player racket hits ball", 0.0)
            .reward_parameter("potential based", 0.5);
        assert_eq!(
            summary.message(),
            "<b>run pong-&lt;1&gt;</b>\n\
             \n\
             environment id PongNoFrameskip-v4\n\
             batch size 32\n\
             gamma 0.99\n\
             \n\
             potential based=0.5"
        );
    }

    #[test]
    fn test_running_mean_window() {
        let mut history = RewardHistory::default();
        assert_eq!(history.running_mean(), (0.0, 0.0));
        for i in 0..60 {
            history.push(if i < 10 { -100.0 } else { 1.0 }, 2.0);
        }
        assert_eq!(history.len(), 60);
        assert_eq!(history.running_mean(), (1.0, 2.0));
    }

    #[test]
    fn test_episode_summary() {
        let mut history = RewardHistory::default();
        history.push(-21.0, -20.0);
        history.push(-19.0, -17.5);
        let summary = EpisodeSummary::new("run", &history).frames(1234, 1_000_000).loss(0.01234);
        let message = summary.message();
        assert!(message.starts_with("<b>run run</b>\n\nframes     1234/1000000\n"));
        assert!(message.contains("episode     2\n"));
        assert!(message.contains("episode reward -19.00 / shaped -17.50"));
        assert!(message.contains("average reward -20.00 / shaped -18.75"));
        assert!(message.ends_with("loss 0.0123"));
    }

    #[test]
    fn test_latest_file() -> Result<()> {
        let dir = TempDir::new("latest_file")?;
        assert_eq!(latest_file(dir.path(), "gif")?, None);

        fs::write(dir.path().join("a.gif"), b"a")?;
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(dir.path().join("b.gif"), b"b")?;
        fs::write(dir.path().join("c.txt"), b"c")?;
        assert_eq!(latest_file(dir.path(), "gif")?, Some(dir.path().join("b.gif")));
        Ok(())
    }

    #[test]
    fn test_failures_are_isolated() -> Result<()> {
        init_logger();
        let dir = TempDir::new("notify")?;
        let summary = EpisodeSummary::new("run", &RewardHistory::default());

        // Missing animation: the message is still delivered.
        let mut recorder = Recorder::default();
        assert!(notify_episode(&mut recorder, &summary, dir.path()));
        assert_eq!(recorder.messages.len(), 1);
        assert_eq!(recorder.messages[0].1, None);

        // Missing directory.
        assert!(notify_episode(&mut recorder, &summary, dir.path().join("missing")));

        // Broken sink.
        let mut broken = Recorder {
            fail: true,
            ..Recorder::default()
        };
        assert!(!notify_episode(&mut broken, &summary, dir.path()));
        assert!(!notify_parameters(&mut broken, &RunSummary::new("run", "Pong-v0")));
        Ok(())
    }

    #[test]
    fn test_animation_is_attached() -> Result<()> {
        let dir = TempDir::new("notify")?;
        let path = dir.path().join("episode-1.gif");
        crate::media::save_animation(&[ndarray::Array3::zeros((4, 4, 1))], &path, 50)?;

        let mut notifier = LogNotifier::default();
        let summary = EpisodeSummary::new("run", &RewardHistory::default());
        assert!(notify_episode(&mut notifier, &summary, dir.path()));
        assert_eq!(notifier.n_sent(), 1);

        let mut recorder = Recorder::default();
        assert!(notify_episode(&mut recorder, &summary, dir.path()));
        assert_eq!(recorder.messages[0].1, Some(path));
        Ok(())
    }
}
