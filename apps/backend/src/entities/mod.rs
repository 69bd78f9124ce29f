pub mod module_access;
pub mod modules;
pub mod push_subscriptions;
pub mod roles;
pub mod lpj;
pub mod tor;
pub mod transactions;
pub mod users;

pub use lpj::Entity as LpjReports;
pub use lpj::Model as LpjReport;
pub use module_access::Entity as ModuleAccess;
pub use module_access::Model as ModuleAccessRow;
pub use modules::Entity as Modules;
pub use modules::Model as Module;
pub use push_subscriptions::Entity as PushSubscriptions;
pub use push_subscriptions::Model as PushSubscription;
pub use roles::Entity as Roles;
pub use roles::Model as Role;
pub use tor::Entity as TorSubmissions;
pub use tor::Model as TorSubmission;
pub use transactions::Entity as Transactions;
pub use transactions::Model as Transaction;
pub use users::Entity as Users;
pub use users::Model as User;
