//! Common UK first names used as a backstop by the leak scanner and the
//! name-column detector.
//!
//! A heuristic list: it misses unusual names and it contains words that are
//! also ordinary English ("Grace", "Summer", "Faith").

pub const COMMON_FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adam", "Alex", "Alexander", "Alfie", "Alice", "Amelia", "Archie",
    "Arthur", "Ava", "Bailey", "Bella", "Ben", "Benjamin", "Billy", "Charlie", "Charlotte",
    "Chloe", "Connor", "Daisy", "Daniel", "David", "Drew", "Dylan", "Edward", "Eli", "Ella",
    "Ellie", "Elliot", "Emily", "Emma", "Erin", "Ethan", "Evie", "Faith", "Felix", "Finley",
    "Florence", "Frankie", "Freddie", "Freya", "George", "Grace", "Hannah", "Harley", "Harper",
    "Harrison", "Harry", "Harvey", "Henry", "Holly", "Hugo", "Imogen", "Isaac", "Isabel",
    "Isabella", "Isabelle", "Isla", "Ivy", "Jack", "Jacob", "Jake", "James", "Jamie", "Jayden",
    "Jesse", "Jessica", "Joe", "Joel", "John", "Jordan", "Joseph", "Joshua", "Katie", "Lacey",
    "Layla", "Leo", "Lewis", "Liam", "Lily", "Logan", "Lola", "Luca", "Lucas", "Lucy", "Luke",
    "Mason", "Matilda", "Matthew", "Max", "Megan", "Mia", "Michael", "Millie", "Mohammed",
    "Molly", "Morgan", "Muhammad", "Nancy", "Nathan", "Noah", "Oliver", "Olivia", "Oscar",
    "Phoebe", "Poppy", "Reuben", "Riley", "Robert", "Rosie", "Rowan", "Ruby", "Ryan", "Samuel",
    "Scarlett", "Sebastian", "Sienna", "Sonny", "Sophia", "Sophie", "Summer", "Taylor", "Theo",
    "Theodore", "Thomas", "Toby", "Tyler", "William", "Willow", "Zachary", "Zara",
];
