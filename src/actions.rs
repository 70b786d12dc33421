// src/actions.rs
//!
//! User-invocable actions
//!
//! Menu entries and palette commands the webview renders. Each action maps
//! onto one transfer operation; `resolve` turns an invocation plus its context
//! into the concrete target.
//!

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::vault::EntryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ActionId {
    /// Folder context menu: "Import local files here"
    ImportHere,
    /// Command: "Import local files" into the configured folder
    ImportToDefault,
    /// File context menu: "Export out of the vault"
    ExportSelected,
    /// Command: "Export the current file"
    ExportActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ActionScope {
    FolderMenu,
    FileMenu,
    Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub id: ActionId,
    pub scope: ActionScope,
    /// Stable identifier for keybindings
    pub command_id: String,
    pub title: String,
    pub icon: String,
}

/// What an invoked action should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Import { folder: String },
    Export { path: String },
    /// Nothing to act on (no active file, no context entry)
    Noop,
}

pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    pub fn standard() -> Self {
        let action = |id, scope, command_id: &str, title: &str| ActionDescriptor {
            id,
            scope,
            command_id: command_id.to_string(),
            title: title.to_string(),
            icon: "file-explorer-glyph".to_string(),
        };

        Self {
            actions: vec![
                action(
                    ActionId::ImportHere,
                    ActionScope::FolderMenu,
                    "local-file-interface-import-here",
                    "Import local files here",
                ),
                action(
                    ActionId::ExportSelected,
                    ActionScope::FileMenu,
                    "local-file-interface-export-selected",
                    "Export out of the vault",
                ),
                action(
                    ActionId::ImportToDefault,
                    ActionScope::Command,
                    "local-file-interface-import",
                    "Import local files",
                ),
                action(
                    ActionId::ExportActive,
                    ActionScope::Command,
                    "local-file-interface-export",
                    "Export the current file",
                ),
            ],
        }
    }

    pub fn all(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Actions offered for a right-clicked entry, or the palette when `None`
    pub fn for_entry(&self, kind: Option<EntryKind>) -> Vec<ActionDescriptor> {
        let scope = match kind {
            Some(EntryKind::Folder) => ActionScope::FolderMenu,
            Some(EntryKind::File) => ActionScope::FileMenu,
            None => ActionScope::Command,
        };
        self.actions
            .iter()
            .filter(|a| a.scope == scope)
            .cloned()
            .collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Work out the target of an invoked action.
///
/// `context` is the right-clicked entry for menu actions; commands ignore it
/// and use the configured folder or the active file.
pub fn resolve(
    id: ActionId,
    context: Option<&str>,
    default_folder: &str,
    active_file: Option<&str>,
) -> Invocation {
    match id {
        ActionId::ImportHere => match context {
            Some(folder) => Invocation::Import {
                folder: folder.to_string(),
            },
            None => Invocation::Noop,
        },
        ActionId::ImportToDefault => Invocation::Import {
            folder: default_folder.to_string(),
        },
        ActionId::ExportSelected => match context {
            Some(path) => Invocation::Export {
                path: path.to_string(),
            },
            None => Invocation::Noop,
        },
        ActionId::ExportActive => match active_file {
            Some(path) => Invocation::Export {
                path: path.to_string(),
            },
            None => Invocation::Noop,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_actions_per_entry_kind() {
        let registry = ActionRegistry::standard();

        let folder_menu = registry.for_entry(Some(EntryKind::Folder));
        assert_eq!(folder_menu.len(), 1);
        assert_eq!(folder_menu[0].id, ActionId::ImportHere);
        assert_eq!(folder_menu[0].title, "Import local files here");

        let file_menu = registry.for_entry(Some(EntryKind::File));
        assert_eq!(file_menu.len(), 1);
        assert_eq!(file_menu[0].id, ActionId::ExportSelected);

        let commands: Vec<_> = registry.for_entry(None).into_iter().map(|a| a.id).collect();
        assert_eq!(commands, vec![ActionId::ImportToDefault, ActionId::ExportActive]);
    }

    #[test]
    fn test_command_ids_are_unique() {
        let registry = ActionRegistry::standard();
        let mut ids: Vec<_> = registry.all().iter().map(|a| a.command_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), registry.all().len());
        assert_eq!(
            registry.get(ActionId::ImportToDefault).unwrap().command_id,
            "local-file-interface-import"
        );
    }

    #[test]
    fn test_resolve_import_actions() {
        assert_eq!(
            resolve(ActionId::ImportHere, Some("notes"), "/", None),
            Invocation::Import {
                folder: "notes".to_string()
            }
        );
        assert_eq!(
            resolve(ActionId::ImportToDefault, Some("ignored"), "inbox", None),
            Invocation::Import {
                folder: "inbox".to_string()
            }
        );
        assert_eq!(resolve(ActionId::ImportHere, None, "/", None), Invocation::Noop);
    }

    #[test]
    fn test_resolve_export_actions() {
        assert_eq!(
            resolve(ActionId::ExportSelected, Some("a.md"), "/", Some("b.md")),
            Invocation::Export {
                path: "a.md".to_string()
            }
        );
        assert_eq!(
            resolve(ActionId::ExportActive, None, "/", Some("b.md")),
            Invocation::Export {
                path: "b.md".to_string()
            }
        );
        assert_eq!(resolve(ActionId::ExportActive, None, "/", None), Invocation::Noop);
    }

    #[test]
    fn test_action_id_serialization() {
        assert_eq!(
            serde_json::to_string(&ActionId::ImportToDefault).unwrap(),
            "\"importToDefault\""
        );
        let id: ActionId = serde_json::from_str("\"exportActive\"").unwrap();
        assert_eq!(id, ActionId::ExportActive);
    }
}
