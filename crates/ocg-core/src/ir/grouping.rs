use indexmap::IndexMap;

use super::actions::IrAction;
use super::types::IrComponent;

/// Actions that share a `group_tag`, emitted together into one module.
#[derive(Debug, Clone)]
pub struct ActionGroup<'a> {
    pub tag: String,
    pub actions: Vec<&'a IrAction>,
}

/// Group actions by tag. Groups appear in order of their first action, and
/// actions keep their document order inside a group.
pub fn group_actions(ir: &IrComponent) -> Vec<ActionGroup<'_>> {
    let mut groups: IndexMap<&str, Vec<&IrAction>> = IndexMap::new();

    for action in &ir.actions {
        groups.entry(action.group_tag.as_str()).or_default().push(action);
    }

    groups
        .into_iter()
        .map(|(tag, actions)| ActionGroup {
            tag: tag.to_string(),
            actions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{HttpMethod, IrDisplay, PerformPlan};

    fn action(key: &str, tag: &str) -> IrAction {
        IrAction {
            key: key.to_string(),
            group_tag: tag.to_string(),
            path: format!("/{tag}"),
            display: IrDisplay::new(key, key),
            inputs: IndexMap::new(),
            perform: PerformPlan {
                method: HttpMethod::Get,
                url: vec![],
                body: None,
                query: None,
            },
        }
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let ir = IrComponent {
            base_url: "https://api.example.com".to_string(),
            display: IrDisplay::new("Example", "Example"),
            actions: vec![
                action("listUsers", "users"),
                action("listPets", "pets"),
                action("getUser", "users"),
            ],
            connections: vec![],
        };

        let groups = group_actions(&ir);
        let tags: Vec<&str> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, ["users", "pets"]);

        let users: Vec<&str> = groups[0].actions.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(users, ["listUsers", "getUser"]);
    }
}
