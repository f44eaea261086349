use super::*;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Two agents with two actions and two observations each, over two states.
fn problem(seed: u64) -> DecPomdp {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    let alphabets = vec![Alphabet::new(2, 2), Alphabet::new(2, 2)];
    DecPomdp::random(2, alphabets, Storage::Dense, rng).unwrap()
}

fn unit(horizon: Stage, parameters: Parameters) -> PlanningUnit<DecPomdp> {
    let _ = env_logger::builder().is_test(true).try_init();
    PlanningUnit::new(problem(42), Horizon::Finite(horizon), parameters).unwrap()
}

fn close(a: Probability, b: Probability) -> bool {
    (a - b).abs() <= PROB_PRECISION
}

#[test]
fn two_agent_horizon_two_counts() {
    for parameters in [Parameters::everything(), Parameters::nothing()] {
        let unit = unit(2, parameters);
        assert_eq!(unit.nr_observation_histories(0), Ok(3));
        assert_eq!(unit.nr_observation_histories_at(0, 0), Ok(1));
        assert_eq!(unit.nr_observation_histories_at(0, 1), Ok(2));
        assert_eq!(unit.first_observation_history_index(0, 1), Ok(1));
        assert_eq!(unit.nr_joint_observation_histories(), Ok(5));
        assert_eq!(unit.nr_joint_observation_histories_at(1), Ok(4));
        assert_eq!(unit.successor_ohi(0, 0, 0), Ok(1));
        assert_eq!(unit.successor_ohi(0, 0, 1), Ok(2));
        assert_eq!(unit.observation_history_array(0, 2), Ok(vec![1]));
        assert_eq!(unit.time_step_for_ohi(0, 2), Ok(1));
        assert!(unit.successor_ohi(0, 1, 0).is_err());
        assert!(unit.time_step_for_ohi(0, 3).is_err());
    }
}

#[test]
fn eager_and_lazy_number_histories_alike() {
    let eager = unit(3, Parameters::everything());
    let lazy = unit(3, Parameters::nothing());
    for agent in 0..2 {
        assert_eq!(eager.nr_observation_histories(agent), lazy.nr_observation_histories(agent));
        assert_eq!(eager.nr_action_histories(agent), lazy.nr_action_histories(agent));
        assert_eq!(
            eager.nr_action_observation_histories(agent),
            lazy.nr_action_observation_histories(agent)
        );
        for ohi in 0..eager.nr_observation_histories(agent).unwrap() {
            let array = eager.observation_history_array(agent, ohi).unwrap();
            assert_eq!(lazy.observation_history_array(agent, ohi).unwrap(), array);
            assert_eq!(lazy.observation_history_index(agent, &array), Ok(ohi));
            assert_eq!(eager.time_step_for_ohi(agent, ohi), lazy.time_step_for_ohi(agent, ohi));
        }
        for ahi in 0..eager.nr_action_histories(agent).unwrap() {
            let array = eager.action_history_array(agent, ahi).unwrap();
            assert_eq!(lazy.action_history_array(agent, ahi).unwrap(), array);
            assert_eq!(lazy.action_history_index(agent, &array), Ok(ahi));
            assert_eq!(eager.time_step_for_ahi(agent, ahi), lazy.time_step_for_ahi(agent, ahi));
            if array.len() + 1 < 3 {
                for action in 0..2 {
                    assert_eq!(
                        eager.successor_ahi(agent, ahi, action).unwrap(),
                        lazy.successor_ahi(agent, ahi, action).unwrap()
                    );
                }
            }
        }
        for aohi in 0..eager.nr_action_observation_histories(agent).unwrap() {
            let (a, o) = eager.action_observation_history_arrays(agent, aohi).unwrap();
            assert_eq!(lazy.action_observation_history_index(agent, &a, &o), Ok(aohi));
            for (action, observation) in [(0, 0), (1, 0), (1, 1)] {
                assert_eq!(
                    eager.successor_aohi(agent, aohi, action, observation),
                    lazy.successor_aohi(agent, aohi, action, observation)
                );
            }
        }
    }
    for johi in 0..eager.nr_joint_observation_histories().unwrap() {
        let array = eager.joint_observation_history_array(johi).unwrap();
        assert_eq!(lazy.joint_observation_history_array(johi).unwrap(), array);
        assert_eq!(lazy.joint_observation_history_index(&array), Ok(johi));
        assert_eq!(
            eager.joint_to_individual_observation_history_indices(johi).unwrap(),
            lazy.joint_to_individual_observation_history_indices(johi).unwrap()
        );
        if array.len() + 1 < 3 {
            for jo in 0..4 {
                assert_eq!(
                    eager.successor_johi(johi, jo).unwrap(),
                    lazy.successor_johi(johi, jo).unwrap()
                );
            }
        }
    }
    for jahi in 0..eager.nr_joint_action_histories().unwrap() {
        assert_eq!(
            eager.joint_action_history_array(jahi),
            lazy.joint_action_history_array(jahi)
        );
        assert_eq!(
            eager.joint_to_individual_action_history_indices(jahi),
            lazy.joint_to_individual_action_history_indices(jahi)
        );
    }
    for jaohi in 0..eager.nr_joint_action_observation_histories().unwrap() {
        let (ja, jo) = eager.joint_action_observation_history_arrays(jaohi).unwrap();
        assert_eq!(lazy.joint_action_observation_history_index(&ja, &jo), Ok(jaohi));
        assert_eq!(
            eager.joint_to_individual_action_observation_history_indices(jaohi),
            lazy.joint_to_individual_action_observation_history_indices(jaohi)
        );
    }
}

#[test]
fn joint_and_individual_indices_roundtrip() {
    let unit = unit(3, Parameters::nothing());
    for johi in 0..unit.nr_joint_observation_histories().unwrap() {
        let stage = unit.time_step_for_johi(johi).unwrap();
        let individual = unit.joint_to_individual_observation_history_indices(johi).unwrap();
        assert_eq!(unit.individual_to_joint_observation_history_index(stage, &individual), Ok(johi));
    }
    for jaohi in 0..unit.nr_joint_action_observation_histories().unwrap() {
        let stage = unit.time_step_for_jaohi(jaohi).unwrap();
        let individual = unit
            .joint_to_individual_action_observation_history_indices(jaohi)
            .unwrap();
        assert_eq!(
            unit.individual_to_joint_action_observation_history_index(stage, &individual),
            Ok(jaohi)
        );
    }
}

#[test]
fn breadth_first_indices_grow_with_length() {
    let unit = unit(3, Parameters::everything());
    let stages = (0..unit.nr_joint_action_observation_histories().unwrap())
        .map(|i| unit.time_step_for_jaohi(i).unwrap())
        .collect::<Vec<_>>();
    assert!(stages.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(stages.last(), Some(&2));
}

#[test]
fn reachable_beliefs_are_normalized() {
    for sparse in [false, true] {
        let parameters = Parameters {
            sparse_beliefs: sparse,
            ..Parameters::nothing()
        };
        let unit = unit(3, parameters);
        for jaohi in 0..unit.nr_joint_action_observation_histories().unwrap() {
            let (belief, p) = unit.jaoh_probs(jaohi, 0, None, None).unwrap();
            assert_eq!(belief.is_sparse(), sparse);
            if p > 0. {
                assert!(belief.sanity_check().is_ok());
            }
        }
    }
}

#[test]
fn cached_and_recomputed_beliefs_agree() {
    let cached = unit(3, Parameters::everything());
    let fresh = unit(3, Parameters::nothing());
    for jaohi in 0..cached.nr_joint_action_observation_histories().unwrap() {
        let a = cached.joint_belief(jaohi).unwrap().to_dense();
        let b = fresh.joint_belief(jaohi).unwrap().to_dense();
        assert!(a.iter().zip(&b).all(|(x, y)| close(*x, *y)));
        assert!(close(
            cached.jaoh_prob_given_pred(jaohi).unwrap(),
            fresh.jaoh_prob_given_pred(jaohi).unwrap()
        ));
        assert!(close(
            cached.jaoh_prob(jaohi, 0, None, None).unwrap(),
            fresh.jaoh_prob(jaohi, 0, None, None).unwrap()
        ));
    }
}

#[test]
fn stage_probabilities_count_action_sequences() {
    let unit = unit(3, Parameters::nothing());
    for stage in 0..3 {
        let first = unit.first_joint_action_observation_history_index(stage).unwrap();
        let count = unit.nr_joint_action_observation_histories_at(stage).unwrap();
        let nr_ja = unit.nr_joint_actions().unwrap() as Probability;
        // without a policy every joint action sequence counts once
        let total = (first..first + count)
            .map(|i| unit.jaoh_prob(i, 0, None, None).unwrap())
            .sum::<Probability>();
        assert!(close(total, nr_ja.powi(stage as i32)));
    }
}

#[test]
fn conditional_on_predecessor() {
    for parameters in [Parameters::everything(), Parameters::nothing()] {
        let unit = unit(3, parameters);
        let parent = unit.successor_jaohi(0, 1, 2).unwrap();
        let child = unit.successor_jaohi(parent, 3, 0).unwrap();
        let joint = unit.jaoh_prob(child, 0, None, None).unwrap();
        let prefix = unit.jaoh_prob(parent, 0, None, None).unwrap();
        let given = unit.jaoh_prob(child, parent, None, None).unwrap();
        assert!(close(given * prefix, joint));
        assert!(close(given, unit.jaoh_prob_given_pred(child).unwrap()));
        let start = unit.joint_belief(parent).unwrap();
        let (belief, p) = unit.jaoh_probs(child, parent, Some(&start), None).unwrap();
        assert!(close(p, given));
        let expected = unit.joint_belief(child).unwrap().to_dense();
        assert!(belief.to_dense().iter().zip(&expected).all(|(x, y)| close(*x, *y)));
    }
}

#[test]
fn inconsistent_predecessor_has_zero_probability() {
    let unit = unit(3, Parameters::nothing());
    let parent = unit.successor_jaohi(0, 1, 2).unwrap();
    let other = unit.successor_jaohi(0, 2, 2).unwrap();
    let child = unit.successor_jaohi(parent, 3, 0).unwrap();
    assert_eq!(unit.jaoh_prob(child, other, None, None), Ok(0.));
    assert_eq!(unit.jaoh_prob(parent, child, None, None), Ok(0.));
    assert_eq!(unit.jaoh_prob_given_pred(0), Ok(1.));
}

#[test]
fn pure_joint_policy_realizations_sum_to_one() {
    let unit = unit(3, Parameters::default());
    let policies = (0..2)
        .map(|agent| {
            let n = unit.nr_observation_histories(agent).unwrap();
            let actions = (0..n).map(|h| (h + agent as Index) % 2).collect();
            PurePolicy::new(PolicyDomain::ObservationHistory, actions)
        })
        .collect::<Vec<_>>();
    let joint = unit.pure_joint_policy(&policies).unwrap();
    assert_eq!(joint.domain(), PolicyDomain::ObservationHistory);
    let first = unit.first_joint_action_observation_history_index(2).unwrap();
    let count = unit.nr_joint_action_observation_histories_at(2).unwrap();
    let total = (first..first + count)
        .map(|i| unit.jaoh_prob(i, 0, None, Some(&joint)).unwrap())
        .sum::<Probability>();
    assert!(close(total, 1.));
}

#[test]
fn action_observation_policy_realizations_sum_to_one() {
    let unit = unit(3, Parameters::default());
    let policies = (0..2)
        .map(|agent| {
            let n = unit.nr_action_observation_histories(agent).unwrap();
            let actions = (0..n).map(|h| (h / 2 + agent as Index) % 2).collect();
            PurePolicy::new(PolicyDomain::ActionObservationHistory, actions)
        })
        .collect::<Vec<_>>();
    let joint = unit.pure_joint_policy(&policies).unwrap();
    assert_eq!(joint.domain(), PolicyDomain::ActionObservationHistory);
    for stage in 1..3 {
        let first = unit.first_joint_action_observation_history_index(stage).unwrap();
        let count = unit.nr_joint_action_observation_histories_at(stage).unwrap();
        let probs = (first..first + count)
            .map(|i| unit.jaoh_prob(i, 0, None, Some(&joint)).unwrap())
            .collect::<Vec<_>>();
        assert!(close(probs.iter().sum::<Probability>(), 1.));
        assert!(probs.iter().filter(|&&p| p > 0.).count() <= (count / 4) as usize);
    }
}

#[test]
fn policy_counts() {
    let unit = unit(2, Parameters::nothing());
    assert_eq!(unit.nr_policies(0), Ok(8));
    assert_eq!(unit.nr_joint_policies(), Ok(64));
    assert_eq!(
        unit.nr_policy_domain_elements(0, PolicyDomain::ObservationHistory, None),
        Ok(3)
    );
    assert_eq!(
        unit.nr_policy_domain_elements(0, PolicyDomain::ObservationHistory, Some(1)),
        Ok(1)
    );
    assert_eq!(
        unit.nr_policy_domain_elements(0, PolicyDomain::ActionObservationHistory, Some(2)),
        Ok(5)
    );
    assert!(matches!(
        unit.nr_policy_domain_elements(0, PolicyDomain::Type, None),
        Err(MadpError::Domain(_))
    ));
    assert_eq!(
        unit.are_cached_joint_to_indiv_indices(PolicyDomain::ObservationHistory),
        Ok(false)
    );
    let eager = self::unit(2, Parameters::default());
    assert_eq!(
        eager.are_cached_joint_to_indiv_indices(PolicyDomain::ActionObservationHistory),
        Ok(true)
    );
}

#[test]
fn single_action_agent_has_one_policy() {
    let problem = DecPomdp::new(1, vec![Alphabet::new(1, 2)], Storage::Sparse).unwrap();
    let unit = PlanningUnit::new(problem, Horizon::Finite(40), Parameters::nothing()).unwrap();
    assert_eq!(unit.nr_observation_histories(0), Ok((1 << 40) - 1));
    assert_eq!(unit.nr_policies(0), Ok(1));
    assert_eq!(unit.nr_joint_policies(), Ok(1));
}

#[test]
fn policy_counts_overflow() {
    let problem = DecPomdp::new(1, vec![Alphabet::new(1000, 10)], Storage::Sparse).unwrap();
    let unit = PlanningUnit::new(problem, Horizon::Finite(3), Parameters::nothing()).unwrap();
    assert_eq!(unit.nr_observation_histories(0), Ok(111));
    assert!(matches!(unit.nr_policies(0), Err(MadpError::Overflow(_))));
    assert!(matches!(unit.nr_joint_policies(), Err(MadpError::Overflow(_))));
}

#[test]
fn history_counts_overflow() {
    let problem = DecPomdp::new(1, vec![Alphabet::new(2, 1 << 20)], Storage::Sparse).unwrap();
    let built = PlanningUnit::new(problem, Horizon::Finite(8), Parameters::nothing());
    assert!(matches!(built, Err(MadpError::Overflow(_))));
}

#[test]
fn infinite_horizon_has_no_histories() {
    let unit = PlanningUnit::new(problem(1), Horizon::Infinite, Parameters::default()).unwrap();
    assert!(matches!(unit.nr_observation_histories(0), Err(MadpError::Domain(_))));
    assert!(matches!(unit.time_step_for_jaohi(0), Err(MadpError::Domain(_))));
    assert!(matches!(unit.stages(), Err(MadpError::Domain(_))));
}

#[test]
fn rebuild_on_new_horizon() {
    let mut unit = unit(2, Parameters::everything());
    assert_eq!(unit.nr_joint_action_observation_histories(), Ok(17));
    unit.set_horizon(Horizon::Finite(3)).unwrap();
    assert_eq!(unit.nr_joint_action_observation_histories(), Ok(17 + 256));
    assert!(unit.joint_belief(272).is_ok());
    unit.set_parameters(Parameters::nothing()).unwrap();
    assert!(matches!(
        unit.joint_to_individual_observation_history_indices_ref(3),
        Err(MadpError::NotCached(_))
    ));
    let bad = Parameters {
        joint_beliefs: true,
        ..Parameters::nothing()
    };
    assert!(matches!(unit.set_parameters(bad), Err(MadpError::Sanity(_))));
    unit.set_problem(problem(3)).unwrap();
    assert!(unit.set_horizon(Horizon::Finite(0)).is_err());
}

#[test]
fn grow_lazy_joint_histories() {
    let mut unit = unit(3, Parameters::nothing());
    let jaohi = unit.successor_jaohi(unit.successor_jaohi(0, 2, 1).unwrap(), 0, 3).unwrap();
    let individual = unit
        .joint_to_individual_action_observation_history_indices(jaohi)
        .unwrap();
    let grown = unit.grow_jaoh(jaohi).unwrap().clone();
    assert_eq!(grown.length(), 2);
    assert_eq!(grown.individual(), &individual[..]);
}

#[test]
fn decompose_action_observation_histories() {
    let unit = unit(3, Parameters::nothing());
    let aohi = unit.action_observation_history_index(0, &[1, 0], &[0, 1]).unwrap();
    let (ahi, ohi) = unit.action_and_observation_history_indices(0, aohi).unwrap();
    assert_eq!(unit.action_history_array(0, ahi), Ok(vec![1, 0]));
    assert_eq!(unit.observation_history_array(0, ohi), Ok(vec![0, 1]));
    // joint action 2 = <a1 a0>, joint observation 1 = <o0 o1>
    let jaohi = unit.joint_action_observation_history_index(&[2], &[1]).unwrap();
    let vectors = unit.joint_aoh_to_individual_action_observation_vectors(jaohi).unwrap();
    assert_eq!(vectors, vec![(vec![1], vec![0]), (vec![0], vec![1])]);
    assert_eq!(unit.joint_observation_history_arrays(2), Ok(vec![vec![0, 1]]));
}

#[test]
fn soft_print_histories() {
    let unit = unit(3, Parameters::nothing());
    assert_eq!(unit.soft_print_observation_history(0, 0).unwrap(), "<EMPTY>");
    assert_eq!(unit.soft_print_observation_history(1, 2).unwrap(), "<o1>");
    assert_eq!(unit.soft_print_action_history(0, 5).unwrap(), "<a1, a0>");
    let aohi = unit.successor_aohi(0, 0, 1, 0).unwrap();
    assert_eq!(
        unit.soft_print_action_observation_history(0, aohi).unwrap(),
        "<(a1, o0)>"
    );
    assert_eq!(
        unit.soft_print_policy_domain_element(0, aohi, PolicyDomain::ActionObservationHistory)
            .unwrap(),
        "<(a1, o0)>"
    );
    let jaohi = unit.successor_jaohi(0, 2, 1).unwrap();
    assert_eq!(
        unit.soft_print_joint_action_observation_history(jaohi).unwrap(),
        "<(<a1 a0>, <o0 o1>)>"
    );
    assert_eq!(unit.soft_print_joint_observation_history(0).unwrap(), "<EMPTY>");
    assert_eq!(unit.soft_print_joint_action_history(4).unwrap(), "<<a1 a1>>");
}

#[test]
fn policy_dot_graph() {
    let unit = unit(2, Parameters::default());
    let policy = PurePolicy::new(PolicyDomain::ObservationHistory, vec![1, 0, 1]);
    let text = unit.policy_to_dot(0, &policy, true).unwrap();
    assert!(text.starts_with("digraph policyAgent0 {"));
    assert_eq!(text.matches("->").count(), 2);
    assert!(text.contains("o1"));
    let short = PurePolicy::new(PolicyDomain::ObservationHistory, vec![1, 0]);
    assert!(matches!(unit.policy_to_dot(0, &short, true), Err(MadpError::Sanity(_))));
    let wrong = PurePolicy::new(PolicyDomain::ActionObservationHistory, vec![0; 5]);
    assert!(matches!(unit.policy_to_dot(0, &wrong, true), Err(MadpError::Domain(_))));
}

#[test]
fn export_policy_graph_to_file() {
    let unit = unit(2, Parameters::default());
    let policy = PurePolicy::new(PolicyDomain::ObservationHistory, vec![0, 1, 1]);
    let path = std::env::temp_dir().join(format!("policy-agent-1-{}.dot", std::process::id()));
    unit.export_dot(1, &policy, false, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(written, unit.policy_to_dot(1, &policy, false).unwrap());
    assert!(written.starts_with("digraph policyAgent1 {"));
}

#[test]
fn display_summarizes() {
    let text = unit(2, Parameters::default()).to_string();
    assert!(text.contains("observation histories        [3, 3] joint 5"));
}

#[test]
fn print_observation_tree() {
    let unit = unit(2, Parameters::default());
    let tree = unit.observation_ledger().unwrap().tree(0).unwrap().to_string();
    assert!(tree.starts_with("ROOT   #0 <EMPTY>"));
    assert!(tree.contains("├──0 → #1 #0 + o0"));
    assert!(tree.contains("└──1 → #2 #0 + o1"));
}
