//! Sample users and posts loaded by the `seed` binary.

/// User entry in a [`SeedPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    /// Unique email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Post entry in a [`SeedPlan`].
///
/// Seeded posts are written directly; publication rules are not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPost {
    /// Post title.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Publication flag.
    pub published: bool,
    /// Index into [`SeedPlan::users`] of the author.
    pub author: usize,
}

/// Ordered set of users and posts to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    /// Users, inserted first.
    pub users: Vec<SeedUser>,
    /// Posts, inserted after every user.
    pub posts: Vec<SeedPost>,
}

fn user(email: &str, name: Option<&str>) -> SeedUser {
    SeedUser {
        email: email.to_owned(),
        name: name.map(str::to_owned),
    }
}

fn post(title: &str, content: Option<&str>, published: bool, author: usize) -> SeedPost {
    SeedPost {
        title: title.to_owned(),
        content: content.map(str::to_owned),
        published,
        author,
    }
}

impl SeedPlan {
    /// Author index of the first post that points past [`SeedPlan::users`].
    pub fn dangling_author(&self) -> Option<usize> {
        self.posts
            .iter()
            .map(|post| post.author)
            .find(|&author| author >= self.users.len())
    }

    /// The five sample users and six sample posts.
    pub fn sample() -> Self {
        Self {
            users: vec![
                user("alice@example.com", Some("Alice Johnson")),
                user("bob@example.com", Some("Bob Smith")),
                user("charlie@example.com", Some("Charlie Brown")),
                user("dana@example.com", Some("Dana White")),
                user("eve@example.com", None),
            ],
            posts: vec![
                post(
                    "Getting Started with Rust",
                    Some(
                        "Rust is a systems language that lets you build fast, reliable \
                         server-side applications...",
                    ),
                    true,
                    0,
                ),
                post(
                    "Error Handling Best Practices",
                    Some(
                        "Typed errors make failure paths explicit, keeping your code \
                         reliable and maintainable...",
                    ),
                    true,
                    1,
                ),
                post(
                    "Diesel ORM Tutorial",
                    Some(
                        "Diesel is a safe, extensible query builder that checks your \
                         database access at compile time...",
                    ),
                    false,
                    2,
                ),
                post(
                    "Actix Web Routing Deep Dive",
                    Some("Learn how to structure your Actix Web routes for scalability and maintainability."),
                    true,
                    3,
                ),
                post("Unpublished Draft", None, false, 0),
                post("Hello World", Some("This is a hello world post."), true, 4),
            ],
        }
    }
}
