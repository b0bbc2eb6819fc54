//! Diesel schema for list and task persistence.

diesel::table! {
    /// Todo lists.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by a list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning list identifier.
        list_id -> Uuid,
        /// Task text.
        #[max_length = 500]
        text -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(lists, tasks);
