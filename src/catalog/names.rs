//! Source lists for the generated prompt categories

/// Directors, including the three two-person teams.
#[rustfmt::skip]
pub const DIRECTORS: &[&str] = &[
    "Steven Spielberg", "Martin Scorsese", "Quentin Tarantino", "Alfred Hitchcock",
    "Stanley Kubrick", "Christopher Nolan", "Akira Kurosawa",
    "Spike Lee", "Wes Anderson", "David Fincher", "Denis Villeneuve",
    "James Cameron", "Peter Jackson", "Ridley Scott", "Tim Burton", "Coen Brothers",
    "The Wachowskis", "Sofia Coppola", "Greta Gerwig", "Bong Joon-ho", "Hayao Miyazaki",
    "Guillermo del Toro", "Jordan Peele", "Taika Waititi", "David Lynch",
    "J.J. Abrams", "Robert Zemeckis", "Jon Favreau", "Sam Raimi", "Clint Eastwood",
    "George Clooney", "M Night Shyamalan", "Russo Brothers", "George Lucas",
    "Zack Snyder", "Joss Whedon", "Michael Bay", "John Carpenter", "David Cronenberg",
    "John Hughes", "Terry Gilliam",
];

#[rustfmt::skip]
pub const ACTORS: &[&str] = &[
    "Tom Hanks", "Leonardo DiCaprio", "Denzel Washington", "Meryl Streep",
    "Robert De Niro", "Al Pacino", "Jack Nicholson", "Morgan Freeman",
    "Samuel L. Jackson", "Kate Winslet", "Brad Pitt", "Cate Blanchett",
    "Jodie Foster", "Anthony Hopkins", "Daniel Day-Lewis", "Christian Bale",
    "Dustin Hoffman", "Robin Williams", "Sean Connery", "Harrison Ford",
    "Clint Eastwood", "Julia Roberts", "Will Smith", "Tom Cruise", "Johnny Depp",
    "Sigourney Weaver", "Sandra Bullock", "Keanu Reeves", "Angelina Jolie",
    "Matt Damon", "George Clooney", "Joaquin Phoenix", "Philip Seymour Hoffman",
    "Viola Davis", "Tilda Swinton", "Gary Oldman", "Jeff Bridges", "Julianne Moore",
    "Natalie Portman", "Robert Redford", "Steve McQueen", "Michael Caine",
    "Sean Penn", "Whoopi Goldberg", "Alan Rickman", "James Earl Jones",
    "Arnold Schwarzenegger", "Sylvester Stallone", "Bruce Willis", "Mel Gibson",
    "Kevin Costner", "Russell Crowe", "Bill Murray", "Eddie Murphy", "Jim Carrey",
    "Steve Martin", "John Travolta", "Kurt Russell", "Christopher Walken",
    "Scarlett Johansson", "Ryan Gosling", "Ryan Reynolds", "Emma Stone",
    "Hugh Jackman", "Anne Hathaway", "Keira Knightley", "Ben Affleck",
    "Emily Blunt", "Michael Fassbender", "Idris Elba", "Mahershala Ali",
    "Adam Driver", "Robert Downey Jr.", "Chris Evans", "Chris Hemsworth",
    "Mark Ruffalo", "Jeremy Renner", "Chris Pratt", "Dwayne \"The Rock\" Johnson",
    "Patrick Stewart", "Ian McKellen", "Daniel Radcliffe",
    "Helena Bonham Carter", "Ralph Fiennes", "Liam Neeson", "Ewan McGregor",
    "Charlize Theron", "Halle Berry", "Jennifer Lawrence", "Reese Witherspoon",
    "Cameron Diaz", "Drew Barrymore", "Gwyneth Paltrow", "Edward Norton",
    "Will Ferrell", "Steve Carell", "Tina Fey", "Tom Hardy", "Benedict Cumberbatch",
    "Martin Freeman", "Colin Firth", "Mark Strong", "Geoffrey Rush",
    "Javier Bardem", "Antonio Banderas", "Christoph Waltz", "Daniel Craig",
    "Judi Dench", "Helen Mirren", "Emma Thompson", "Orlando Bloom",
    "Viggo Mortensen", "Elijah Wood", "Andy Serkis", "Hugo Weaving",
    "Christopher Lee", "Willem Dafoe", "Jeff Goldblum", "Sam Neill", "Uma Thurman",
    "Val Kilmer", "Tommy Lee Jones", "John Goodman", "Steve Buscemi",
    "Benicio del Toro", "Forest Whitaker", "Jamie Foxx", "Jon Hamm", "Elisabeth Moss",
    "Oscar Isaac", "John Boyega", "Jake Gyllenhaal", "Heath Ledger",
    "Bradley Cooper", "Vin Diesel", "Jason Statham", "Jackie Chan",
    "Zendaya", "Anya Taylor-Joy", "Timothée Chalamet", "Florence Pugh", "Brie Larson",
    "Frances McDormand", "Amy Adams",
];

#[rustfmt::skip]
pub const GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Documentary",
    "Drama", "Fantasy", "Horror", "Mystery", "Romance", "Sci-Fi", "Thriller",
    "Western", "Musical", "War", "History", "Family", "Sport",
];

pub const DECADES: &[i32] = &[1970, 1980, 1990, 2000, 2010];

/// A directing team credited as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectorTeam {
    /// Entry in [`DIRECTORS`]
    pub entry: &'static str,
    /// Id slug
    pub slug: &'static str,
    pub label: &'static str,
    pub members: [&'static str; 2],
}

pub const DIRECTOR_TEAMS: &[DirectorTeam] = &[
    DirectorTeam {
        entry: "Coen Brothers",
        slug: "coen-brothers",
        label: "Directed by the Coen Brothers",
        members: ["Joel Coen", "Ethan Coen"],
    },
    DirectorTeam {
        entry: "The Wachowskis",
        slug: "the-wachowskis",
        label: "Directed by The Wachowskis",
        members: ["Lana Wachowski", "Lilly Wachowski"],
    },
    DirectorTeam {
        entry: "Russo Brothers",
        slug: "russo-brothers",
        label: "Directed by the Russo Brothers",
        members: ["Anthony Russo", "Joe Russo"],
    },
];

/// Extra spellings a genre also accepts. Spacing and hyphens are ignored
/// when comparing, so "Sci Fi" and "SciFi" already match "Sci-Fi".
pub fn genre_aliases(genre: &str) -> &'static [&'static str] {
    match genre {
        "Sci-Fi" => &["Science Fiction"],
        "Animation" => &["Anime"],
        _ => &[],
    }
}
