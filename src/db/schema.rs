diesel::table! {
    videos (id) {
        id -> Int4,
        name -> Varchar,
        views -> Int4,
        likes -> Int4,
    }
}
