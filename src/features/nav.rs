//! Control bar menu, which depends on whether someone is logged in

use crate::models::User;

/// Places the control bar can take you
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    AllPosts,
    MyPosts,
    NewPost,
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Go(NavTarget),
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub key: char,
    pub action: MenuAction,
}

impl MenuItem {
    const fn new(label: &'static str, key: char, action: MenuAction) -> Self {
        MenuItem { label, key, action }
    }
}

/// Menu entries for the current user
pub fn menu(user: Option<&User>) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::new("All Posts", '1', MenuAction::Go(NavTarget::AllPosts))];
    if user.is_some() {
        items.push(MenuItem::new("My Posts", '2', MenuAction::Go(NavTarget::MyPosts)));
        items.push(MenuItem::new("New Post", '3', MenuAction::Go(NavTarget::NewPost)));
        items.push(MenuItem::new("Logout", 'o', MenuAction::Logout));
    } else {
        items.push(MenuItem::new("Login", 'l', MenuAction::Go(NavTarget::Login)));
        items.push(MenuItem::new("Register", 'r', MenuAction::Go(NavTarget::Register)));
    }
    items
}

/// Whether `action` is on the menu for `user`
pub fn allows(user: Option<&User>, action: MenuAction) -> bool {
    menu(user).iter().any(|item| item.action == action)
}

/// Menu action bound to `key`, if any
pub fn action_for_key(user: Option<&User>, key: char) -> Option<MenuAction> {
    menu(user)
        .into_iter()
        .find(|item| item.key == key)
        .map(|item| item.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(user: Option<&User>) -> Vec<&'static str> {
        menu(user).iter().map(|i| i.label).collect()
    }

    #[test]
    fn test_anonymous_menu() {
        assert_eq!(labels(None), vec!["All Posts", "Login", "Register"]);
        assert!(!allows(None, MenuAction::Go(NavTarget::NewPost)));
        assert!(!allows(None, MenuAction::Logout));
    }

    #[test]
    fn test_logged_in_menu() {
        let user = User {
            id: 1,
            username: "ana".into(),
        };
        assert_eq!(
            labels(Some(&user)),
            vec!["All Posts", "My Posts", "New Post", "Logout"]
        );
        assert!(!allows(Some(&user), MenuAction::Go(NavTarget::Login)));
        assert_eq!(action_for_key(Some(&user), 'o'), Some(MenuAction::Logout));
        assert_eq!(action_for_key(Some(&user), 'l'), None);
    }
}
