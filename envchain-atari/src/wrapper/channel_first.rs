//! Conversion of observations to channel-first layout.
use anyhow::Result;
use envchain_core::{
    error::EnvChainError, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step,
};

/// Permutes observations from `(h, w, c)` to `(c, h, w)`.
///
/// This is the layout expected by convolutional networks of most deep
/// learning frameworks. Stacked frames are materialized here, so this wrapper
/// should be the outermost one when lazy frames are to be kept.
pub struct ChannelFirst<E: Env> {
    env: E,
}

impl<E: Env> ChannelFirst<E> {
    /// Wraps an environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    fn convert(&self, obs: Obs) -> Result<Obs> {
        let expected = self.env.observation_space().shape;
        if obs.shape() != expected {
            return Err(EnvChainError::ShapeMismatch {
                wrapper: "ChannelFirst",
                expected: format!("{:?}", expected),
                found: obs.shape().to_vec(),
            }
            .into());
        }

        let chw = obs
            .as_array()
            .view()
            .permuted_axes([2, 0, 1])
            .as_standard_layout()
            .into_owned();
        Ok(Obs::frame(chw))
    }
}

impl<E: Env> Env for ChannelFirst<E> {
    fn name(&self) -> &str {
        "ChannelFirst"
    }

    fn observation_space(&self) -> ObsSpace {
        let space = self.env.observation_space();
        let [h, w, c] = space.shape;
        space.with_shape([c, h, w])
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let obs = self.env.reset()?;
        self.convert(obs)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let step = self.env.step(act)?;
        Ok(Step {
            obs: self.convert(step.obs)?,
            ..step
        })
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelFirst;
    use crate::{
        util::test::{ScriptedEnv, ScriptedStep},
        FrameStack, FrameStackConfig,
    };
    use anyhow::Result;
    use envchain_core::{DiscreteAct, Env};

    #[test]
    fn test_permutation() -> Result<()> {
        let base = ScriptedEnv::new([84, 84, 1]);
        let stacked = FrameStack::build(base, &FrameStackConfig::default())?;
        let mut env = ChannelFirst::new(stacked);
        assert_eq!(env.observation_space().shape, [4, 84, 84]);

        let obs = env.reset()?;
        assert_eq!(obs.shape(), [4, 84, 84]);
        Ok(())
    }

    #[test]
    fn test_elements_are_moved_not_reordered() -> Result<()> {
        let base = ScriptedEnv::new([2, 3, 1])
            .reset_fill(10)
            .script(vec![ScriptedStep::fill(20), ScriptedStep::fill(30)]);
        let config = FrameStackConfig::default().n_stack(3);
        let mut env = ChannelFirst::new(FrameStack::build(base, &config)?);
        env.reset()?;
        env.step(&DiscreteAct::NOOP)?;

        let step = env.step(&DiscreteAct::NOOP)?;
        let array = step.obs.as_array();
        assert_eq!(array.dim(), (3, 2, 3));
        assert!(array.is_standard_layout());
        for (c, v) in [10u8, 20, 30].iter().enumerate() {
            assert!(array.index_axis(ndarray::Axis(0), c).iter().all(|x| x == v));
        }
        Ok(())
    }
}
