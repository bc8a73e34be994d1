//! Structural properties of freshly built and traversed search trees

mod common;

use common::{FAR_FROM_PASSENGER, env_at, tree_at};
use taxi_driver::{
    Error,
    search::{SearchTree, Stage, TreeTraversal, full_tree_size},
    taxi::ActionCatalog,
    types::ActionMask,
};

#[test]
fn test_node_count_matches_geometric_sum() {
    let env = env_at(FAR_FROM_PASSENGER);
    for depth in 1..=4 {
        let tree = tree_at(&env, Stage::Pick, depth);
        let expected: usize = (1..=depth).map(|i| 5usize.pow(i as u32)).sum();
        assert_eq!(tree.decision_node_count(), expected, "depth {depth}");
        assert_eq!(tree.len(), expected + 1);
        assert_eq!(full_tree_size(5, depth), expected);
    }
}

#[test]
fn test_paths_and_depths_are_consistent() {
    let env = env_at(FAR_FROM_PASSENGER);
    let tree = tree_at(&env, Stage::Drop, 3);

    for (id, node) in tree.iter() {
        let full_path = tree.full_path(id).unwrap();
        assert_eq!(full_path.len(), 2 * node.depth());
        if node.is_root() {
            assert!(tree.action_sequence(id).unwrap().is_empty());
            continue;
        }

        let actions = tree.action_sequence(id).unwrap();
        assert_eq!(actions.len(), node.depth());
        assert_eq!(actions.last().copied(), node.action());
        assert!(actions.iter().all(|action| ActionCatalog::drop_actions().contains(action)));

        let step = tree.ancestor_at_depth_one(id).unwrap();
        assert_eq!(tree.node(step).unwrap().action(), actions.first().copied());
    }
}

#[test]
fn test_cumulative_reward_extends_parent_after_traversal() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 3);
    TreeTraversal::new(Stage::Pick).run(&mut tree, &mut env).unwrap();

    let mut visited = 0;
    for (_, node) in tree.iter().filter(|(_, node)| !node.is_root()) {
        let Some(_) = node.state() else { continue };
        visited += 1;
        let parent = tree.node(node.parent().unwrap()).unwrap();
        assert!(parent.is_visited());
        assert_eq!(
            node.cumulative_reward(),
            parent.cumulative_reward() + node.reward()
        );
    }
    assert_eq!(visited, tree.visited_count());
}

#[test]
fn test_restrict_children_is_idempotent() {
    let env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    let root = tree.root();
    let mask = ActionMask::from_bits([0, 1, 1, 0, 0, 0]);

    assert_eq!(tree.restrict_children(root, &mask).unwrap(), 3);
    assert_eq!(tree.restrict_children(root, &mask).unwrap(), 0);
    assert_eq!(tree.node(root).unwrap().children().len(), 2);

    // Restricting everything leaves no children, and nothing comes back
    assert_eq!(tree.restrict_children(root, &ActionMask::none()).unwrap(), 2);
    assert_eq!(tree.restrict_children(root, &ActionMask::all()).unwrap(), 0);
    assert!(tree.node(root).unwrap().children().is_empty());
}

#[test]
fn test_depth_limits() {
    let env = env_at(FAR_FROM_PASSENGER);
    let state = FAR_FROM_PASSENGER;
    let observation = taxi_driver::ports::Environment::observation_of(&env, state).unwrap();

    for depth in [0, 10] {
        let result = SearchTree::for_stage(state, observation, Stage::Pick, depth);
        assert!(
            matches!(result, Err(Error::InvalidConfiguration { .. })),
            "depth {depth}"
        );
    }
}

#[test]
fn test_root_has_no_ancestor() {
    let env = env_at(FAR_FROM_PASSENGER);
    let tree = tree_at(&env, Stage::Pick, 1);
    assert!(matches!(
        tree.ancestor_at_depth_one(tree.root()),
        Err(Error::RootHasNoAncestor)
    ));
}
